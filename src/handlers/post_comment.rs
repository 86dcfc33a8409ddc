use crate::error::ServiceError;
use crate::model::Session;

#[derive(::serde::Deserialize)]
pub(crate) struct Body {
    body: String,
}

pub(crate) async fn handler(
    content_id: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let session = match crate::handlers::session(&state, token).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let body: Body = crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(handler_inner(&state, &content_id, session, body).await)
}

async fn handler_inner(
    state: &crate::State,
    content_id: &str,
    session: Session,
    body: Body,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let username = crate::handlers::author_username(state, &session).await;

    let comment = state
        .repository
        .create_comment(content_id, &session.user_id, &username, &body.body)
        .await?;

    Ok(crate::handlers::created(&comment))
}
