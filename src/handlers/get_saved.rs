use crate::error::ServiceError;
use crate::model::Session;

pub(crate) async fn handler(
    username: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    crate::handlers::reply(handler_inner(&state, &username, viewer).await)
}

async fn handler_inner(
    state: &crate::State,
    username: &str,
    viewer: Option<Session>,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let session = crate::handlers::require(viewer)?;

    let profile = state
        .repository
        .get_profile_by_username(username)
        .await
        .ok_or(ServiceError::NotFound)?;

    if profile.user_id != session.user_id {
        return Err(ServiceError::Forbidden);
    }

    let saved = state.repository.list_saved(&session.user_id).await;

    Ok(crate::handlers::ok(&saved))
}
