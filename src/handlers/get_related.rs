use crate::repository::content::DEFAULT_RELATED_LIMIT;

pub(crate) async fn handler(
    content_type: crate::model::ContentType,
    slug: String,
    query: crate::utils::LimitParams,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let related = state
        .repository
        .list_related(&slug, content_type, query.limit_or(DEFAULT_RELATED_LIMIT))
        .await;

    Ok(crate::handlers::ok(&related))
}
