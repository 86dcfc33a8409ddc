use ::serde_json::Value;

use crate::error::ServiceError;
use crate::mapper;
use crate::model::{fields, Comment};
use crate::store::{Fields, Query, StoreError};

impl super::Repository {
    /// Writes the number of comments referencing `content_id` onto the
    /// content document.
    async fn refresh_comment_count(&self, content_id: &str) -> Result<u64, StoreError> {
        let count = self
            .store
            .list_documents(
                &self.collections.comments,
                &[Query::equal(fields::CONTENT_ID, content_id), Query::Limit(1)],
            )
            .await?
            .total;

        let mut data = Fields::new();
        data.insert(fields::COMMENT_COUNT.into(), Value::from(count));

        self.store
            .update_document(&self.collections.content, content_id, data, None)
            .await?;

        Ok(count)
    }

    pub async fn create_comment(
        &self,
        content_id: &str,
        user_id: &str,
        username: &str,
        body: &str,
    ) -> Result<Comment, ServiceError> {
        if body.trim().is_empty() {
            return Err(ServiceError::validation("Comment cannot be empty"));
        }

        self.store
            .get_document(&self.collections.content, content_id)
            .await?;

        let mut data = Fields::new();
        data.insert(fields::CONTENT_ID.into(), content_id.into());
        data.insert(fields::USER_ID.into(), user_id.into());
        data.insert(fields::USERNAME.into(), username.into());
        data.insert(fields::COMMENT_BODY.into(), body.into());
        data.insert(fields::CREATED_AT.into(), super::now());

        let document = self
            .store
            .create_document(&self.collections.comments, None, data)
            .await?;

        if let Err(err) = self.refresh_comment_count(content_id).await {
            ::log::error!(
                "failed to refresh comment count of {}: {}",
                content_id,
                err
            );
        }

        Ok(mapper::document_to_comment(&document))
    }

    /// Comments on a piece, newest first.
    pub async fn list_comments(&self, content_id: &str) -> Vec<Comment> {
        super::or_default(
            self.store
                .list_documents(
                    &self.collections.comments,
                    &[
                        Query::equal(fields::CONTENT_ID, content_id),
                        Query::order_desc(fields::CREATED_AT),
                    ],
                )
                .await
                .map(|list| list.documents),
            "list_comments",
        )
        .iter()
        .map(mapper::document_to_comment)
        .collect()
    }
}
