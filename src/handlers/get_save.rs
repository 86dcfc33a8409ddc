pub(crate) async fn handler(
    content_id: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    let session = match crate::handlers::require(viewer) {
        Ok(session) => session,
        Err(err) => return crate::handlers::reply(Err(err)),
    };

    let saved = state
        .repository
        .is_saved(&content_id, &session.user_id)
        .await;

    Ok(crate::handlers::ok(&::serde_json::json!({ "saved": saved })))
}
