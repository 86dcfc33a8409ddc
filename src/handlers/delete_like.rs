use crate::error::ServiceError;
use crate::model::Session;

pub(crate) async fn handler(
    content_id: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    crate::handlers::reply(handler_inner(&state, &content_id, viewer).await)
}

async fn handler_inner(
    state: &crate::State,
    content_id: &str,
    viewer: Option<Session>,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let session = crate::handlers::require(viewer)?;

    let changed = state.repository.unlike(content_id, &session.user_id).await?;

    let like_state = state
        .repository
        .like_state(content_id, Some(session.user_id.as_str()))
        .await
        .ok_or(ServiceError::NotFound)?;

    Ok(crate::handlers::ok(&::serde_json::json!({
        "changed": changed,
        "likes": like_state.likes,
        "liked": like_state.liked,
    })))
}
