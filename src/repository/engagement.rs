use ::serde::Serialize;
use ::serde_json::Value;

use crate::error::ServiceError;
use crate::mapper;
use crate::model::{fields, SavedContent};
use crate::store::{Document, Fields, Query, StoreError};

/// Attempts at a revision-guarded like/unlike before giving up.
const MAX_LIKE_ATTEMPTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LikeState {
    pub likes: u64,
    pub liked: bool,
}

fn liker_set(document: &Document) -> Vec<String> {
    mapper::document_to_content(document).liked_by
}

fn liker_fields(liked_by: Vec<String>) -> Fields {
    let mut data = Fields::new();
    data.insert(fields::LIKES.into(), Value::from(liked_by.len() as u64));
    data.insert(fields::LIKED_BY.into(), Value::from(liked_by));
    data
}

impl super::Repository {
    /// Read-modify-write of the liker set. `change` returns `None` when the
    /// document needs no write. The write is guarded by the revision read,
    /// and retried when another writer got there first.
    async fn update_likers<F>(
        &self,
        content_id: &str,
        change: F,
    ) -> Result<bool, ServiceError>
    where
        F: Fn(Vec<String>) -> Option<Vec<String>>,
    {
        let collection = &self.collections.content;

        for attempt in 1..=MAX_LIKE_ATTEMPTS {
            let document = self.store.get_document(collection, content_id).await?;

            let Some(liked_by) = change(liker_set(&document)) else {
                return Ok(false);
            };

            match self
                .store
                .update_document(
                    collection,
                    content_id,
                    liker_fields(liked_by),
                    Some(&document.revision),
                )
                .await
            {
                Ok(_) => return Ok(true),
                Err(StoreError::Conflict) => {
                    ::log::debug!(
                        "like conflict on {} attempt {}",
                        content_id,
                        attempt
                    );
                }
                Err(err) => return Err(err.into()),
            }
        }

        ::log::warn!("giving up like update on {}", content_id);

        Err(ServiceError::Store(StoreError::Conflict))
    }

    /// Adds the user to the liker set. `false` when already liked.
    pub async fn like(
        &self,
        content_id: &str,
        user_id: &str,
    ) -> Result<bool, ServiceError> {
        self.update_likers(content_id, |mut liked_by| {
            if liked_by.iter().any(|liker| liker == user_id) {
                return None;
            }
            liked_by.push(user_id.to_string());
            Some(liked_by)
        })
        .await
    }

    /// Removes the user from the liker set. `false` when not liked.
    pub async fn unlike(
        &self,
        content_id: &str,
        user_id: &str,
    ) -> Result<bool, ServiceError> {
        self.update_likers(content_id, |liked_by| {
            if !liked_by.iter().any(|liker| liker == user_id) {
                return None;
            }
            Some(
                liked_by
                    .into_iter()
                    .filter(|liker| liker != user_id)
                    .collect(),
            )
        })
        .await
    }

    pub async fn like_state(
        &self,
        content_id: &str,
        user_id: Option<&str>,
    ) -> Option<LikeState> {
        let document = super::or_none(
            self.store
                .get_document(&self.collections.content, content_id)
                .await,
            "like_state",
        )?;

        let content = mapper::document_to_content(&document);

        Some(LikeState {
            likes: content.likes,
            liked: user_id
                .map(|user_id| content.liked_by.iter().any(|liker| liker == user_id))
                .unwrap_or(false),
        })
    }

    async fn saved_records(
        &self,
        content_id: &str,
        user_id: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let list = self
            .store
            .list_documents(
                &self.collections.saved_content,
                &[
                    Query::equal(fields::USER_ID, user_id),
                    Query::equal(fields::CONTENT_ID, content_id),
                ],
            )
            .await?;

        Ok(list.documents)
    }

    pub async fn is_saved(&self, content_id: &str, user_id: &str) -> bool {
        !super::or_default(
            self.saved_records(content_id, user_id).await,
            "is_saved",
        )
        .is_empty()
    }

    /// Flips the save state and returns the new one.
    pub async fn toggle_save(
        &self,
        content_id: &str,
        user_id: &str,
    ) -> Result<bool, ServiceError> {
        let existing = self.saved_records(content_id, user_id).await?;

        if !existing.is_empty() {
            for record in existing {
                match self
                    .store
                    .delete_document(&self.collections.saved_content, &record.id)
                    .await
                {
                    Ok(()) | Err(StoreError::NotFound) => {}
                    Err(err) => return Err(err.into()),
                }
            }
            return Ok(false);
        }

        self.store
            .get_document(&self.collections.content, content_id)
            .await?;

        let mut data = Fields::new();
        data.insert(fields::USER_ID.into(), user_id.into());
        data.insert(fields::CONTENT_ID.into(), content_id.into());
        data.insert(fields::SAVED_AT.into(), super::now());

        match self
            .store
            .create_document(&self.collections.saved_content, None, data)
            .await
        {
            // a concurrent toggle already saved it
            Ok(_) | Err(StoreError::Conflict) => Ok(true),
            Err(err) => Err(err.into()),
        }
    }

    /// Saved records newest first, each with its content when it still
    /// exists.
    pub async fn list_saved(&self, user_id: &str) -> Vec<SavedContent> {
        let documents = super::or_default(
            self.store
                .list_documents(
                    &self.collections.saved_content,
                    &[
                        Query::equal(fields::USER_ID, user_id),
                        Query::order_desc(fields::SAVED_AT),
                    ],
                )
                .await
                .map(|list| list.documents),
            "list_saved",
        );

        let lookups = documents.iter().map(|document| async move {
            let mut saved = mapper::document_to_saved(document);
            saved.content = super::or_none(
                self.store
                    .get_document(&self.collections.content, &saved.content_id)
                    .await,
                "list_saved content",
            )
            .map(|document| mapper::document_to_content(&document));
            saved
        });

        ::futures::future::join_all(lookups).await
    }
}
