pub(crate) async fn handler(
    content_id: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    let user_id = viewer.as_ref().map(|session| session.user_id.as_str());

    match state.repository.like_state(&content_id, user_id).await {
        Some(like_state) => Ok(crate::handlers::ok(&like_state)),
        None => Ok(crate::handlers::not_found()),
    }
}
