pub(crate) async fn handler(
    query: crate::utils::AuthorsParams,
    state: ::std::sync::Arc<crate::State>,
) -> crate::handlers::HandlerResult {
    let page = state
        .repository
        .list_authors(query.page(), query.query.as_deref())
        .await;

    Ok(crate::handlers::ok(&page))
}
