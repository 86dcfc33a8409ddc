use crate::error::ServiceError;
use crate::model::{Session, Visibility};

#[derive(::serde::Deserialize)]
pub(crate) struct Body {
    title: String,
    body: String,
    #[serde(default)]
    visibility: Visibility,
}

pub(crate) async fn handler(
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let session = match crate::handlers::session(&state, token).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let body: Body = crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(handler_inner(&state, session, body).await)
}

async fn handler_inner(
    state: &crate::State,
    session: Session,
    body: Body,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let username = crate::handlers::author_username(state, &session).await;

    let post = state
        .repository
        .create_blog_post(
            &body.title,
            &body.body,
            &session.user_id,
            &username,
            body.visibility,
        )
        .await?;

    Ok(crate::handlers::created(&post))
}
