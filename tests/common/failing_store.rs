use ::std::sync::atomic::{AtomicBool, Ordering};
use ::std::sync::Arc;

use verses::store::memory::MemoryStore;
use verses::store::{Document, DocumentList, DocumentStore, Fields, Query, StoreError};

/// Wraps a `MemoryStore` and fails selected operations on demand.
pub struct FailingStore {
    inner: Arc<MemoryStore>,
    fail_gets: AtomicBool,
    fail_lists: AtomicBool,
    fail_updates: AtomicBool,
}

fn unavailable() -> StoreError {
    StoreError::Other(::anyhow::anyhow!("backend unavailable"))
}

impl FailingStore {
    pub fn new(inner: Arc<MemoryStore>) -> Self {
        Self {
            inner,
            fail_gets: AtomicBool::new(false),
            fail_lists: AtomicBool::new(false),
            fail_updates: AtomicBool::new(false),
        }
    }

    pub fn fail_gets(&self, fail: bool) {
        self.fail_gets.store(fail, Ordering::SeqCst);
    }

    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    pub fn fail_updates(&self, fail: bool) {
        self.fail_updates.store(fail, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl DocumentStore for FailingStore {
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Fields,
    ) -> Result<Document, StoreError> {
        self.inner.create_document(collection, id, data).await
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError> {
        if self.fail_gets.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.get_document(collection, id).await
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError> {
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.list_documents(collection, queries).await
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
        expected_revision: Option<&str>,
    ) -> Result<Document, StoreError> {
        if self.fail_updates.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner
            .update_document(collection, id, data, expected_revision)
            .await
    }

    async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        self.inner.delete_document(collection, id).await
    }

    async fn create_file(
        &self,
        bucket: &str,
        filename: &str,
        bytes: ::bytes::Bytes,
    ) -> Result<String, StoreError> {
        self.inner.create_file(bucket, filename, bytes).await
    }

    async fn delete_file(
        &self,
        bucket: &str,
        file_id: &str,
    ) -> Result<(), StoreError> {
        self.inner.delete_file(bucket, file_id).await
    }

    fn file_view_url(&self, bucket: &str, file_id: &str) -> String {
        self.inner.file_view_url(bucket, file_id)
    }
}
