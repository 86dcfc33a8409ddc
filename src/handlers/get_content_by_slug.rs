pub(crate) async fn handler(
    content_type: crate::model::ContentType,
    slug: String,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    match state.repository.get_by_slug(content_type, &slug).await {
        Some(content) => Ok(crate::handlers::ok(&content)),
        None => Ok(crate::handlers::not_found()),
    }
}
