use super::{Document, DocumentList, Fields, Query, StoreError};

#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document. A `None` id lets the store generate one.
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Fields,
    ) -> Result<Document, StoreError>;

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError>;

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError>;

    /// Merges `data` into the document. When `expected_revision` is set
    /// and no longer matches, fails with `StoreError::Conflict`.
    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
        expected_revision: Option<&str>,
    ) -> Result<Document, StoreError>;

    async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError>;

    /// Stores a file and returns its id.
    async fn create_file(
        &self,
        bucket: &str,
        filename: &str,
        bytes: ::bytes::Bytes,
    ) -> Result<String, StoreError>;

    async fn delete_file(
        &self,
        bucket: &str,
        file_id: &str,
    ) -> Result<(), StoreError>;

    fn file_view_url(&self, bucket: &str, file_id: &str) -> String;
}
