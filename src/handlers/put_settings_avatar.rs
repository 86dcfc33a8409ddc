use crate::error::ServiceError;
use crate::model::Session;

/// The request body is the raw image.
pub(crate) async fn handler(
    query: crate::utils::AvatarParams,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let viewer =
        crate::warp_try_err_500!(crate::handlers::viewer(&state, token).await);

    crate::handlers::reply(
        handler_inner(&state, viewer, query.filename(), bytes).await,
    )
}

async fn handler_inner(
    state: &crate::State,
    viewer: Option<Session>,
    filename: &str,
    bytes: ::bytes::Bytes,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let session = crate::handlers::require(viewer)?;

    let profile = state
        .repository
        .set_avatar(&session.user_id, filename, bytes)
        .await?;

    Ok(crate::handlers::ok(&profile))
}
