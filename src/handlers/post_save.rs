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

    let saved = state
        .repository
        .toggle_save(content_id, &session.user_id)
        .await?;

    Ok(crate::handlers::ok(&::serde_json::json!({ "saved": saved })))
}
