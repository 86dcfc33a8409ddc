use crate::error::ServiceError;
use crate::model::Session;
use crate::repository::profiles::ProfileUpdate;

pub(crate) async fn handler(
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let session = match crate::handlers::session(&state, token).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let update: ProfileUpdate =
        crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(handler_inner(&state, session, update).await)
}

async fn handler_inner(
    state: &crate::State,
    session: Session,
    update: ProfileUpdate,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let profile = state
        .repository
        .update_profile(&session.user_id, update)
        .await?;

    Ok(crate::handlers::ok(&profile))
}
