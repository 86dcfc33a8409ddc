pub(crate) async fn handler(
    username: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    let Some(page) = state.repository.author_page(&username).await else {
        return Ok(crate::handlers::not_found());
    };

    let is_owner = viewer
        .as_ref()
        .is_some_and(|session| session.user_id == page.profile.user_id);

    let blog_posts = state
        .repository
        .list_blog_posts_by_user(&page.profile.user_id, is_owner)
        .await;

    Ok(crate::handlers::ok(&::serde_json::json!({
        "profile": page.profile,
        "works": page.works,
        "blogPosts": blog_posts,
        "isOwner": is_owner,
    })))
}
