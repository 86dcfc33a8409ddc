use crate::error::ServiceError;
use crate::model::Session;
use crate::repository::content::NewContent;

pub(crate) async fn handler(
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let session = match crate::handlers::session(&state, token).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let new_content: NewContent =
        crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(handler_inner(&state, session, new_content).await)
}

async fn handler_inner(
    state: &crate::State,
    session: Session,
    new_content: NewContent,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let username = crate::handlers::author_username(state, &session).await;

    let content = state
        .repository
        .publish(&session.user_id, &username, new_content)
        .await?;

    Ok(crate::handlers::created(&content))
}
