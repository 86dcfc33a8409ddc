use ::std::convert::Infallible;
use ::std::sync::Arc;

use ::warp::{Filter, Rejection, Reply};

use crate::handlers;
use crate::handlers::get_feed::Feed;
use crate::model::ContentType;

// JSON bodies are small; avatars get their own limit
const MAX_JSON_BODY: u64 = 256 * 1024;

fn with_state(
    state: Arc<crate::State>,
) -> impl Filter<Extract = (Arc<crate::State>,), Error = Infallible> + Clone {
    ::warp::any().map(move || state.clone())
}

/// The token of an `Authorization: Bearer` header, if any.
fn bearer_token(
) -> impl Filter<Extract = (Option<String>,), Error = Rejection> + Clone {
    ::warp::header::optional::<String>("authorization").map(
        |header: Option<String>| {
            header
                .as_deref()
                .and_then(|value| value.strip_prefix("Bearer "))
                .map(|token| token.trim().to_string())
                .filter(|token| !token.is_empty())
        },
    )
}

/// A route segment naming a content type. Anything else is not found.
fn content_type_segment(
) -> impl Filter<Extract = (ContentType,), Error = Rejection> + Clone {
    ::warp::path::param::<String>().and_then(|segment: String| async move {
        ContentType::from_route_segment(&segment)
            .ok_or_else(::warp::reject::not_found)
    })
}

fn json_body(
) -> impl Filter<Extract = (::bytes::Bytes,), Error = Rejection> + Clone {
    ::warp::body::content_length_limit(MAX_JSON_BODY).and(::warp::body::bytes())
}

fn feed(
    state: Arc<crate::State>,
    name: &'static str,
    feed: Feed,
) -> ::warp::filters::BoxedFilter<(Box<dyn Reply>,)> {
    ::warp::path("content")
        .and(::warp::path(name))
        .and(::warp::path::end())
        .and(::warp::get())
        .and(with_state(state))
        .and(::warp::any().map(move || feed))
        .and(::warp::query::<crate::utils::LimitParams>())
        .and_then(handlers::get_feed::handler)
        .boxed()
}

fn content_routes(
    state: Arc<crate::State>,
) -> ::warp::filters::BoxedFilter<(impl Reply,)> {
    let publish = ::warp::path!("content")
        .and(::warp::post())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(handlers::post_content::handler);

    let list_by_type = content_type_segment()
        .and(::warp::path::end())
        .and(::warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_content_by_type::handler);

    let by_slug = content_type_segment()
        .and(::warp::path::param::<String>())
        .and(::warp::path::end())
        .and(::warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_content_by_slug::handler);

    let related = content_type_segment()
        .and(::warp::path::param::<String>())
        .and(::warp::path("related"))
        .and(::warp::path::end())
        .and(::warp::get())
        .and(::warp::query::<crate::utils::LimitParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::get_related::handler);

    feed(state.clone(), "latest", Feed::Latest)
        .or(feed(state.clone(), "popular", Feed::Popular))
        .or(feed(state, "featured", Feed::Featured))
        .or(publish)
        .or(list_by_type)
        .or(by_slug)
        .or(related)
        .boxed()
}

fn engagement_routes(
    state: Arc<crate::State>,
) -> ::warp::filters::BoxedFilter<(impl Reply,)> {
    let get_like = ::warp::path!("content" / String / "like")
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_like::handler);

    let post_like = ::warp::path!("content" / String / "like")
        .and(::warp::post())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::post_like::handler);

    let delete_like = ::warp::path!("content" / String / "like")
        .and(::warp::delete())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::delete_like::handler);

    let get_save = ::warp::path!("content" / String / "save")
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_save::handler);

    let post_save = ::warp::path!("content" / String / "save")
        .and(::warp::post())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::post_save::handler);

    let get_comments = ::warp::path!("content" / String / "comments")
        .and(::warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_comments::handler);

    let post_comment = ::warp::path!("content" / String / "comments")
        .and(::warp::post())
        .and(bearer_token())
        .and(with_state(state))
        .and(json_body())
        .and_then(handlers::post_comment::handler);

    get_like
        .or(post_like)
        .or(delete_like)
        .or(get_save)
        .or(post_save)
        .or(get_comments)
        .or(post_comment)
        .boxed()
}

fn profile_routes(
    state: Arc<crate::State>,
) -> ::warp::filters::BoxedFilter<(impl Reply,)> {
    let register = ::warp::path!("register")
        .and(::warp::post())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(handlers::post_register::handler);

    let authors = ::warp::path!("authors")
        .and(::warp::get())
        .and(::warp::query::<crate::utils::AuthorsParams>())
        .and(with_state(state.clone()))
        .and_then(handlers::get_authors::handler);

    let author = ::warp::path!("authors" / String)
        .and(::warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_author::handler);

    let profile = ::warp::path!("profile" / String)
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_profile::handler);

    let saved = ::warp::path!("profile" / String / "saved")
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_saved::handler);

    let user_blog = ::warp::path!("profile" / String / "blog")
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_user_blog::handler);

    let user_blog_post = ::warp::path!("profile" / String / "blog" / String)
        .and(::warp::get())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and_then(handlers::get_user_blog_post::handler);

    let post_blog = ::warp::path!("blog")
        .and(::warp::post())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(handlers::post_blog::handler);

    let put_blog = ::warp::path!("blog" / String)
        .and(::warp::put())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(handlers::put_blog::handler);

    let settings_profile = ::warp::path!("settings" / "profile")
        .and(::warp::put())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and(json_body())
        .and_then(handlers::put_settings_profile::handler);

    let set_avatar = ::warp::path!("settings" / "avatar")
        .and(::warp::put())
        .and(::warp::query::<crate::utils::AvatarParams>())
        .and(bearer_token())
        .and(with_state(state.clone()))
        .and(::warp::body::content_length_limit(
            crate::repository::profiles::MAX_AVATAR_BYTES as u64,
        ))
        .and(::warp::body::bytes())
        .and_then(handlers::put_settings_avatar::handler);

    let remove_avatar = ::warp::path!("settings" / "avatar")
        .and(::warp::delete())
        .and(bearer_token())
        .and(with_state(state))
        .and_then(handlers::delete_settings_avatar::handler);

    register
        .or(authors)
        .or(author)
        .or(profile)
        .or(saved)
        .or(user_blog)
        .or(user_blog_post)
        .or(post_blog)
        .or(put_blog)
        .or(settings_profile)
        .or(set_avatar)
        .or(remove_avatar)
        .boxed()
}

async fn handle_rejection(
    err: Rejection,
) -> Result<::warp::reply::Response, Infallible> {
    use ::warp::http::StatusCode;

    let (message, status) = if err.is_not_found() {
        ("Not found", StatusCode::NOT_FOUND)
    } else if err.find::<::warp::reject::PayloadTooLarge>().is_some() {
        ("Request body too large", StatusCode::PAYLOAD_TOO_LARGE)
    } else if err.find::<::warp::reject::LengthRequired>().is_some() {
        ("Content-Length required", StatusCode::LENGTH_REQUIRED)
    } else if err.find::<::warp::reject::InvalidQuery>().is_some() {
        ("Invalid query string", StatusCode::BAD_REQUEST)
    } else if err.find::<::warp::filters::cors::CorsForbidden>().is_some() {
        ("CORS request forbidden", StatusCode::FORBIDDEN)
    } else if err.find::<::warp::reject::MethodNotAllowed>().is_some() {
        ("Method not allowed", StatusCode::METHOD_NOT_ALLOWED)
    } else {
        ::log::warn!("rejection {:?}", err);
        ("Internal server error", StatusCode::INTERNAL_SERVER_ERROR)
    };

    Ok(handlers::error_reply(message, status))
}

/// Every route of the API.
pub fn api(
    state: Arc<crate::State>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let cors = ::warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type", "authorization"])
        .allow_methods(&[
            ::warp::http::Method::GET,
            ::warp::http::Method::POST,
            ::warp::http::Method::PUT,
            ::warp::http::Method::DELETE,
        ]);

    let health = ::warp::path!("health")
        .and(::warp::get())
        .and(with_state(state.clone()))
        .and_then(handlers::get_health::handler);

    let version = ::warp::path!("version")
        .and(::warp::get())
        .then(handlers::get_version::handler);

    health
        .or(version)
        .or(engagement_routes(state.clone()))
        .or(profile_routes(state.clone()))
        .or(content_routes(state))
        .with(cors)
        .recover(handle_rejection)
        .with(::warp::log("verses::api"))
}
