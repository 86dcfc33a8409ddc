use crate::error::ServiceError;
use crate::model::Session;
use crate::repository::blog::BlogPostUpdate;

pub(crate) async fn handler(
    slug: String,
    token: Option<String>,
    state: ::std::sync::Arc<crate::State>,
    bytes: ::bytes::Bytes,
) -> crate::handlers::HandlerResult {
    let session = match crate::handlers::session(&state, token).await {
        Ok(session) => session,
        Err(reply) => return Ok(reply),
    };

    let update: BlogPostUpdate =
        crate::warp_try_err_400!(crate::handlers::parse_json(&bytes));

    crate::handlers::reply(handler_inner(&state, &slug, session, update).await)
}

async fn handler_inner(
    state: &crate::State,
    slug: &str,
    session: Session,
    update: BlogPostUpdate,
) -> Result<Box<dyn ::warp::Reply>, ServiceError> {
    let post = state
        .repository
        .update_blog_post(slug, &session.user_id, update)
        .await?;

    Ok(crate::handlers::ok(&post))
}
