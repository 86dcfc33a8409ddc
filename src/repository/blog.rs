use crate::error::ServiceError;
use crate::mapper;
use crate::model::{fields, Content, Visibility};
use crate::store::{Fields, Query};

/// Owner edit of a blog post. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, ::serde::Deserialize)]
pub struct BlogPostUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub visibility: Option<Visibility>,
}

impl super::Repository {
    pub async fn create_blog_post(
        &self,
        title: &str,
        body: &str,
        user_id: &str,
        username: &str,
        visibility: Visibility,
    ) -> Result<Content, ServiceError> {
        super::content::validate_post(title, body)?;

        let mut data = Fields::new();
        data.insert(fields::TITLE.into(), title.into());
        data.insert(fields::BODY.into(), body.into());
        data.insert(fields::USER_ID.into(), user_id.into());
        data.insert(fields::USERNAME.into(), username.into());
        data.insert(fields::VISIBILITY.into(), visibility.as_str().into());
        data.insert(fields::CREATED_AT.into(), super::now());
        data.insert(fields::LIKES.into(), 0.into());
        data.insert(fields::LIKED_BY.into(), ::serde_json::json!([]));
        data.insert(fields::COMMENT_COUNT.into(), 0.into());

        let document = self
            .store
            .create_document(&self.collections.blog, None, data)
            .await?;

        ::log::info!(
            "{} created {} blog post {}",
            username,
            visibility.as_str(),
            document.id
        );

        Ok(mapper::document_to_blog_post(&document))
    }

    async fn list_blog(&self, queries: &[Query], operation: &str) -> Vec<Content> {
        super::or_default(
            self.store
                .list_documents(&self.collections.blog, queries)
                .await
                .map(|list| list.documents),
            operation,
        )
        .iter()
        .map(mapper::document_to_blog_post)
        .collect()
    }

    /// A user's posts, newest first. Private posts are included only for
    /// the owner.
    pub async fn list_blog_posts_by_user(
        &self,
        user_id: &str,
        is_owner: bool,
    ) -> Vec<Content> {
        let mut queries = vec![Query::equal(fields::USER_ID, user_id)];
        if !is_owner {
            queries.push(Query::equal(
                fields::VISIBILITY,
                Visibility::Public.as_str(),
            ));
        }
        queries.push(Query::order_desc(fields::CREATED_AT));

        self.list_blog(&queries, "list_blog_posts_by_user").await
    }

    pub async fn list_public_blog_posts(&self) -> Vec<Content> {
        self.list_blog(
            &[
                Query::equal(fields::VISIBILITY, Visibility::Public.as_str()),
                Query::order_desc(fields::CREATED_AT),
            ],
            "list_public_blog_posts",
        )
        .await
    }

    /// Fetches a post regardless of its visibility.
    pub async fn get_blog_post(&self, slug: &str) -> Option<Content> {
        super::or_none(
            self.store.get_document(&self.collections.blog, slug).await,
            "get_blog_post",
        )
        .map(|document| mapper::document_to_blog_post(&document))
    }

    /// Fetches a post as seen by `viewer_id`: private posts are only
    /// visible to their author.
    pub async fn get_blog_post_for_viewer(
        &self,
        slug: &str,
        viewer_id: Option<&str>,
    ) -> Option<Content> {
        self.get_blog_post(slug).await.filter(|post| {
            post.visibility != Some(Visibility::Private)
                || viewer_id == Some(post.author.id.as_str())
        })
    }

    pub async fn update_blog_post(
        &self,
        slug: &str,
        owner_id: &str,
        update: BlogPostUpdate,
    ) -> Result<Content, ServiceError> {
        let document = self.store.get_document(&self.collections.blog, slug).await?;

        if document.str_field(fields::USER_ID) != Some(owner_id) {
            return Err(ServiceError::Forbidden);
        }

        let mut data = Fields::new();
        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(ServiceError::validation("Title is required"));
            }
            data.insert(fields::TITLE.into(), title.into());
        }
        if let Some(body) = update.body {
            if body.trim().is_empty() {
                return Err(ServiceError::validation("Body is required"));
            }
            data.insert(fields::BODY.into(), body.into());
        }
        if let Some(visibility) = update.visibility {
            data.insert(fields::VISIBILITY.into(), visibility.as_str().into());
        }

        if data.is_empty() {
            return Ok(mapper::document_to_blog_post(&document));
        }

        let updated = self
            .store
            .update_document(&self.collections.blog, slug, data, None)
            .await?;

        Ok(mapper::document_to_blog_post(&updated))
    }
}
