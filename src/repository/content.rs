use crate::error::ServiceError;
use crate::mapper;
use crate::model::{fields, CollectionKind, Content, ContentType, Visibility};
use crate::store::{Fields, Query};

pub const DEFAULT_LATEST_LIMIT: u64 = 10;
pub const DEFAULT_POPULAR_LIMIT: u64 = 5;
pub const DEFAULT_FEATURED_LIMIT: u64 = 6;
pub const DEFAULT_RELATED_LIMIT: u64 = 3;

#[derive(Debug, Clone, ::serde::Deserialize)]
pub struct NewContent {
    pub title: String,
    pub body: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
}

/// Checks that title and body are not blank.
pub(crate) fn validate_post(title: &str, body: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::validation("Title is required"));
    }

    if body.trim().is_empty() {
        return Err(ServiceError::validation("Body is required"));
    }

    Ok(())
}

impl super::Repository {
    async fn list_content(&self, queries: &[Query], operation: &str) -> Vec<Content> {
        let result = self
            .store
            .list_documents(&self.collections.content, queries)
            .await;

        super::or_default(result.map(|list| list.documents), operation)
            .iter()
            .map(mapper::document_to_content)
            .collect()
    }

    /// All content of one type in store order. Blog posts come from the
    /// blog collection and only public ones are listed.
    pub async fn list_by_type(&self, content_type: ContentType) -> Vec<Content> {
        if content_type.collection() == CollectionKind::Blog {
            return self.list_public_blog_posts().await;
        }

        self.list_content(
            &[Query::equal(fields::TYPE, content_type.discriminator())],
            "list_by_type",
        )
        .await
    }

    pub async fn list_latest(&self, limit: u64) -> Vec<Content> {
        self.list_content(
            &[Query::order_desc(fields::PUBLISHED_AT), Query::Limit(limit)],
            "list_latest",
        )
        .await
    }

    pub async fn list_most_popular(&self, limit: u64) -> Vec<Content> {
        self.list_content(
            &[Query::order_desc(fields::LIKES), Query::Limit(limit)],
            "list_most_popular",
        )
        .await
    }

    pub async fn list_featured(&self, limit: u64) -> Vec<Content> {
        self.list_content(
            &[
                Query::equal(fields::FEATURED, true),
                Query::order_desc(fields::PUBLISHED_AT),
                Query::Limit(limit),
            ],
            "list_featured",
        )
        .await
    }

    /// Point lookup. A piece stored under a different type is reported as
    /// missing, as is a private blog post.
    pub async fn get_by_slug(
        &self,
        content_type: ContentType,
        slug: &str,
    ) -> Option<Content> {
        if content_type.collection() == CollectionKind::Blog {
            return self
                .get_blog_post(slug)
                .await
                .filter(|post| post.visibility != Some(Visibility::Private));
        }

        let document = super::or_none(
            self.store
                .get_document(&self.collections.content, slug)
                .await,
            "get_by_slug",
        )?;

        if document.str_field(fields::TYPE) != Some(content_type.discriminator())
        {
            return None;
        }

        Some(mapper::document_to_content(&document))
    }

    pub async fn list_by_author(&self, user_id: &str) -> Vec<Content> {
        self.list_content(
            &[
                Query::equal(fields::USER_ID, user_id),
                Query::order_desc(fields::PUBLISHED_AT),
            ],
            "list_by_author",
        )
        .await
    }

    /// Other pieces of the same type in store order.
    pub async fn list_related(
        &self,
        content_id: &str,
        content_type: ContentType,
        limit: u64,
    ) -> Vec<Content> {
        if content_type.collection() == CollectionKind::Blog {
            return self
                .list_public_blog_posts()
                .await
                .into_iter()
                .filter(|content| content.id != content_id)
                .take(limit as usize)
                .collect();
        }

        self.list_content(
            &[
                Query::equal(fields::TYPE, content_type.discriminator()),
                Query::not_equal(fields::ID, content_id),
                Query::Limit(limit),
            ],
            "list_related",
        )
        .await
    }

    /// Publishes a new piece for the session's author. Blog posts go to the
    /// blog collection as public posts.
    pub async fn publish(
        &self,
        user_id: &str,
        username: &str,
        new_content: NewContent,
    ) -> Result<Content, ServiceError> {
        validate_post(&new_content.title, &new_content.body)?;

        if new_content.content_type.collection() == CollectionKind::Blog {
            return self
                .create_blog_post(
                    &new_content.title,
                    &new_content.body,
                    user_id,
                    username,
                    Visibility::Public,
                )
                .await;
        }

        let mut data = Fields::new();
        data.insert(fields::TITLE.into(), new_content.title.into());
        data.insert(fields::BODY.into(), new_content.body.into());
        data.insert(
            fields::TYPE.into(),
            new_content.content_type.discriminator().into(),
        );
        data.insert(fields::USER_ID.into(), user_id.into());
        data.insert(fields::USERNAME.into(), username.into());
        data.insert(fields::PUBLISHED_AT.into(), super::now());
        data.insert(fields::LIKES.into(), 0.into());
        data.insert(fields::LIKED_BY.into(), ::serde_json::json!([]));
        data.insert(fields::COMMENT_COUNT.into(), 0.into());

        let document = self
            .store
            .create_document(&self.collections.content, None, data)
            .await?;

        ::log::info!(
            "{} published {} {}",
            username,
            new_content.content_type,
            document.id
        );

        Ok(mapper::document_to_content(&document))
    }
}
