use crate::repository::content::{
    DEFAULT_FEATURED_LIMIT, DEFAULT_LATEST_LIMIT, DEFAULT_POPULAR_LIMIT,
};

/// The home page lists.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Feed {
    Latest,
    Popular,
    Featured,
}

pub(crate) async fn handler(
    state: ::std::sync::Arc<crate::State>,
    feed: Feed,
    query: crate::utils::LimitParams,
) -> crate::handlers::HandlerResult {
    let repository = &state.repository;

    let content = match feed {
        Feed::Latest => {
            repository
                .list_latest(query.limit_or(DEFAULT_LATEST_LIMIT))
                .await
        }
        Feed::Popular => {
            repository
                .list_most_popular(query.limit_or(DEFAULT_POPULAR_LIMIT))
                .await
        }
        Feed::Featured => {
            repository
                .list_featured(query.limit_or(DEFAULT_FEATURED_LIMIT))
                .await
        }
    };

    Ok(crate::handlers::ok(&content))
}
