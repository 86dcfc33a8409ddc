pub(crate) async fn handler(
    username: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    let Some(profile) = state.repository.get_profile_by_username(&username).await
    else {
        return Ok(crate::handlers::not_found());
    };

    // ownership comes from the session, never from the request
    let is_owner = viewer
        .as_ref()
        .is_some_and(|session| session.user_id == profile.user_id);

    let posts = state
        .repository
        .list_blog_posts_by_user(&profile.user_id, is_owner)
        .await;

    Ok(crate::handlers::ok(&posts))
}
