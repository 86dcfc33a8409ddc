pub(crate) async fn handler(
    username: String,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    match state.repository.author_page(&username).await {
        Some(page) => Ok(crate::handlers::ok(&page)),
        None => Ok(crate::handlers::not_found()),
    }
}
