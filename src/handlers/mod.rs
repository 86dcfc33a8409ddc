pub(crate) mod delete_like;
pub(crate) mod delete_settings_avatar;
pub(crate) mod get_author;
pub(crate) mod get_authors;
pub(crate) mod get_comments;
pub(crate) mod get_content_by_slug;
pub(crate) mod get_content_by_type;
pub(crate) mod get_feed;
pub(crate) mod get_health;
pub(crate) mod get_like;
pub(crate) mod get_profile;
pub(crate) mod get_related;
pub(crate) mod get_save;
pub(crate) mod get_saved;
pub(crate) mod get_user_blog;
pub(crate) mod get_user_blog_post;
pub(crate) mod get_version;
pub(crate) mod post_blog;
pub(crate) mod post_comment;
pub(crate) mod post_content;
pub(crate) mod post_like;
pub(crate) mod post_register;
pub(crate) mod post_save;
pub(crate) mod put_blog;
pub(crate) mod put_settings_avatar;
pub(crate) mod put_settings_profile;

use ::warp::Reply;

use crate::error::ServiceError;
use crate::model::Session;
use crate::store::StoreError;

pub(crate) type HandlerResult =
    Result<Box<dyn ::warp::Reply>, ::std::convert::Infallible>;

pub(crate) fn json_reply<T: ::serde::Serialize>(
    value: &T,
    status: ::warp::http::StatusCode,
) -> Box<dyn ::warp::Reply> {
    Box::new(::warp::reply::with_status(::warp::reply::json(value), status))
}

pub(crate) fn ok<T: ::serde::Serialize>(value: &T) -> Box<dyn ::warp::Reply> {
    json_reply(value, ::warp::http::StatusCode::OK)
}

pub(crate) fn created<T: ::serde::Serialize>(
    value: &T,
) -> Box<dyn ::warp::Reply> {
    json_reply(value, ::warp::http::StatusCode::CREATED)
}

pub(crate) fn error_reply(
    message: &str,
    status: ::warp::http::StatusCode,
) -> ::warp::reply::Response {
    ::warp::reply::with_status(
        ::warp::reply::json(&::serde_json::json!({ "error": message })),
        status,
    )
    .into_response()
}

pub(crate) fn not_found() -> Box<dyn ::warp::Reply> {
    Box::new(error_reply("Not found", ::warp::http::StatusCode::NOT_FOUND))
}

/// Turns the result of a `handler_inner` into a reply.
pub(crate) fn reply(
    result: Result<Box<dyn ::warp::Reply>, ServiceError>,
) -> HandlerResult {
    Ok(match result {
        Ok(reply) => reply,
        Err(err) => {
            match err {
                ServiceError::Store(ref store_err) => {
                    ::log::error!("request failed: {}", store_err);
                }
                ServiceError::Internal(ref internal) => {
                    ::log::error!("request failed: {:#}", internal);
                }
                _ => {}
            }
            Box::new(error_reply(&err.to_string(), err.status()))
        }
    })
}

pub(crate) fn parse_json<T: ::serde::de::DeserializeOwned>(
    bytes: &::bytes::Bytes,
) -> ::anyhow::Result<T> {
    ::serde_json::from_slice(bytes)
        .map_err(|err| ::anyhow::anyhow!("invalid request body: {}", err))
}

/// Resolves the bearer token of a request. Unknown or expired tokens
/// resolve to no viewer.
pub(crate) async fn viewer(
    state: &crate::State,
    token: Option<String>,
) -> Result<Option<Session>, StoreError> {
    match token {
        Some(token) => {
            state.repository.accounts().resolve_session(&token).await
        }
        None => Ok(None),
    }
}

pub(crate) fn require(viewer: Option<Session>) -> Result<Session, ServiceError> {
    viewer.ok_or(ServiceError::Unauthorized)
}

/// Resolves the viewer of a request that needs one. The error side is the
/// reply to send back: 500 when the session lookup fails, 401 without a
/// session.
pub(crate) async fn session(
    state: &crate::State,
    token: Option<String>,
) -> Result<Session, Box<dyn ::warp::Reply>> {
    match viewer(state, token).await {
        Ok(Some(session)) => Ok(session),
        Ok(None) => {
            let err = ServiceError::Unauthorized;
            Err(Box::new(error_reply(&err.to_string(), err.status())))
        }
        Err(err) => {
            ::log::error!("{}", err);
            Err(Box::new(error_reply(
                "Internal server error",
                ::warp::http::StatusCode::INTERNAL_SERVER_ERROR,
            )))
        }
    }
}

/// Username written onto new documents: the profile's, falling back to
/// the account name.
pub(crate) async fn author_username(
    state: &crate::State,
    session: &Session,
) -> String {
    state
        .repository
        .get_profile_by_user_id(&session.user_id)
        .await
        .map(|profile| profile.username)
        .unwrap_or_else(|| session.name.clone())
}
