pub(crate) async fn handler(
    content_id: String,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let comments = state.repository.list_comments(&content_id).await;

    Ok(crate::handlers::ok(&comments))
}
