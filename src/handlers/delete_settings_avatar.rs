use crate::error::ServiceError;
use crate::model::Session;

pub(crate) async fn handler(
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    crate::handlers::reply(handler_inner(&state, viewer).await)
}

async fn handler_inner(
    state: &crate::State,
    viewer: Option<Session>,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let session = crate::handlers::require(viewer)?;

    let profile = state.repository.remove_avatar(&session.user_id).await?;

    Ok(crate::handlers::ok(&profile))
}
