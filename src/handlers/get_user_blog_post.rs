pub(crate) async fn handler(
    username: String,
    slug: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    let Some(profile) = state.repository.get_profile_by_username(&username).await
    else {
        return Ok(crate::handlers::not_found());
    };

    let viewer_id = viewer.as_ref().map(|session| session.user_id.as_str());

    // the username copied onto the post goes stale after a rename
    match state
        .repository
        .get_blog_post_for_viewer(&slug, viewer_id)
        .await
        .filter(|post| post.author.id == profile.user_id)
    {
        Some(post) => Ok(crate::handlers::ok(&post)),
        None => Ok(crate::handlers::not_found()),
    }
}
