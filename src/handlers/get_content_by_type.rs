pub(crate) async fn handler(
    content_type: crate::model::ContentType,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let content = state.repository.list_by_type(content_type).await;

    Ok(crate::handlers::ok(&::serde_json::json!({
        "type": content_type,
        "label": content_type.label(),
        "content": content,
    })))
}
