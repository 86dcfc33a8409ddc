use ::warp::reply::Response;
use ::warp::{http::StatusCode, Reply};

/// Health endpoint that checks the document store is reachable.
/// Returns 200 when it answers within two seconds, otherwise 503.
pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
) -> Result<Response, ::std::convert::Infallible> {
    use ::serde_json::json;
    use ::tokio::time::{timeout, Duration};

    let repository = &state.repository;

    let store_ok = timeout(Duration::from_secs(2), async {
        repository
            .store()
            .list_documents(
                &repository.collections().content,
                &[crate::store::Query::Limit(1)],
            )
            .await
            .is_ok()
    })
    .await
    .unwrap_or(false);

    let body = json!({
        "store": store_ok,
        "status": if store_ok { "ok" } else { "degraded" }
    });

    let status = if store_ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    Ok(
        ::warp::reply::with_status(::warp::reply::json(&body), status)
            .into_response(),
    )
}
