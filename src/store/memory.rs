//! In-process document store used by tests and local development.
//!
//! Mirrors the backend semantics the services depend on: insertion order
//! as the default order, `total` counted before pagination, unique indexes
//! and revision preconditions.

use ::std::cmp::Ordering;
use ::std::collections::HashMap;
use ::std::sync::RwLock;

use ::chrono::Utc;
use ::serde_json::Value;

use super::{
    interface, Document, DocumentList, Fields, Query, StoreError,
};

#[derive(Default)]
struct Collection {
    documents: Vec<Document>,
    unique_indexes: Vec<Vec<String>>,
}

impl Collection {
    fn violates_unique(&self, candidate: &Document) -> bool {
        self.unique_indexes.iter().any(|index| {
            let key: Option<Vec<&Value>> = index
                .iter()
                .map(|field| candidate.data.get(field))
                .collect();

            let Some(key) = key else {
                return false;
            };

            self.documents.iter().any(|existing| {
                existing.id != candidate.id
                    && index
                        .iter()
                        .zip(key.iter())
                        .all(|(field, value)| existing.data.get(field) == Some(*value))
            })
        })
    }
}

#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, Collection>>,
    files: RwLock<HashMap<(String, String), ::bytes::Bytes>>,
    revision_counter: ::std::sync::atomic::AtomicU64,
}

fn lock_poisoned() -> StoreError {
    StoreError::Other(::anyhow::anyhow!("memory store lock poisoned"))
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store with the unique indexes the services expect.
    pub fn for_collections(collections: &crate::model::Collections) -> Self {
        use crate::model::fields;

        Self::new()
            .with_unique_index(&collections.user_profiles, &[fields::USERNAME])
            .with_unique_index(&collections.user_profiles, &[fields::USER_ID])
            .with_unique_index(
                &collections.saved_content,
                &[fields::USER_ID, fields::CONTENT_ID],
            )
    }

    pub fn with_unique_index(self, collection: &str, index: &[&str]) -> Self {
        if let Ok(mut collections) = self.collections.write() {
            collections
                .entry(collection.to_string())
                .or_default()
                .unique_indexes
                .push(index.iter().map(|field| field.to_string()).collect());
        }
        self
    }

    pub fn file(&self, bucket: &str, file_id: &str) -> Option<::bytes::Bytes> {
        self.files
            .read()
            .ok()?
            .get(&(bucket.to_string(), file_id.to_string()))
            .cloned()
    }

    fn next_revision(&self) -> String {
        let revision = self
            .revision_counter
            .fetch_add(1, ::std::sync::atomic::Ordering::SeqCst);
        revision.to_string()
    }
}

fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(l)), Some(Value::Number(r))) => {
            let l = l.as_f64().unwrap_or(0.0);
            let r = r.as_f64().unwrap_or(0.0);
            l.partial_cmp(&r).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(l)), Some(Value::String(r))) => l.cmp(r),
        (Some(Value::Bool(l)), Some(Value::Bool(r))) => l.cmp(r),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Less,
        (_, None | Some(Value::Null)) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

fn field_equals(document: &Document, field: &str, value: &Value) -> bool {
    if field == "$id" {
        return value.as_str() == Some(document.id.as_str());
    }
    document.data.get(field) == Some(value)
}

fn matches(document: &Document, queries: &[Query]) -> bool {
    queries.iter().all(|query| match query {
        Query::Equal(field, value) => field_equals(document, field, value),
        Query::NotEqual(field, value) => !field_equals(document, field, value),
        Query::Search(field, term) => document
            .str_field(field)
            .map(|text| text.to_lowercase().contains(&term.to_lowercase()))
            .unwrap_or(false),
        _ => true,
    })
}

fn apply_queries(documents: &[Document], queries: &[Query]) -> DocumentList {
    let mut selected: Vec<(usize, &Document)> = documents
        .iter()
        .enumerate()
        .filter(|(_, document)| matches(document, queries))
        .collect();

    let orderings: Vec<(&str, bool)> = queries
        .iter()
        .filter_map(|query| match query {
            Query::OrderAsc(field) => Some((field.as_str(), false)),
            Query::OrderDesc(field) => Some((field.as_str(), true)),
            _ => None,
        })
        .collect();

    if let Some((_, newest_first)) = orderings.first().copied() {
        // Ties fall back to insertion order, reversed for descending sorts.
        selected.sort_by(|(left_index, left), (right_index, right)| {
            for (field, descending) in &orderings {
                let ordering =
                    compare_values(left.data.get(*field), right.data.get(*field));
                let ordering = if *descending {
                    ordering.reverse()
                } else {
                    ordering
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            if newest_first {
                right_index.cmp(left_index)
            } else {
                left_index.cmp(right_index)
            }
        });
    }

    let selected: Vec<Document> =
        selected.into_iter().map(|(_, document)| document.clone()).collect();

    let total = selected.len() as u64;

    let offset = queries
        .iter()
        .find_map(|query| match query {
            Query::Offset(offset) => Some(*offset as usize),
            _ => None,
        })
        .unwrap_or(0);

    let limit = queries.iter().find_map(|query| match query {
        Query::Limit(limit) => Some(*limit as usize),
        _ => None,
    });

    let page = selected.into_iter().skip(offset);
    let documents = match limit {
        Some(limit) => page.take(limit).collect(),
        None => page.collect(),
    };

    DocumentList { total, documents }
}

#[async_trait::async_trait]
impl interface::DocumentStore for MemoryStore {
    async fn create_document(
        &self,
        collection: &str,
        id: Option<&str>,
        data: Fields,
    ) -> Result<Document, StoreError> {
        let now = Utc::now();

        let document = Document {
            id: id
                .map(|id| id.to_string())
                .unwrap_or_else(|| ::uuid::Uuid::new_v4().simple().to_string()),
            created_at: now,
            updated_at: now,
            revision: self.next_revision(),
            data,
        };

        let mut collections =
            self.collections.write().map_err(|_| lock_poisoned())?;
        let entry = collections.entry(collection.to_string()).or_default();

        if entry.documents.iter().any(|existing| existing.id == document.id)
            || entry.violates_unique(&document)
        {
            return Err(StoreError::Conflict);
        }

        entry.documents.push(document.clone());

        Ok(document)
    }

    async fn get_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Document, StoreError> {
        let collections =
            self.collections.read().map_err(|_| lock_poisoned())?;

        collections
            .get(collection)
            .and_then(|entry| {
                entry.documents.iter().find(|document| document.id == id)
            })
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn list_documents(
        &self,
        collection: &str,
        queries: &[Query],
    ) -> Result<DocumentList, StoreError> {
        let collections =
            self.collections.read().map_err(|_| lock_poisoned())?;

        Ok(match collections.get(collection) {
            Some(entry) => apply_queries(&entry.documents, queries),
            None => DocumentList {
                total: 0,
                documents: vec![],
            },
        })
    }

    async fn update_document(
        &self,
        collection: &str,
        id: &str,
        data: Fields,
        expected_revision: Option<&str>,
    ) -> Result<Document, StoreError> {
        let revision = self.next_revision();

        let mut collections =
            self.collections.write().map_err(|_| lock_poisoned())?;
        let entry = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;

        let position = entry
            .documents
            .iter()
            .position(|document| document.id == id)
            .ok_or(StoreError::NotFound)?;

        if let Some(expected) = expected_revision {
            if entry.documents[position].revision != expected {
                return Err(StoreError::Conflict);
            }
        }

        let mut updated = entry.documents[position].clone();
        for (field, value) in data {
            updated.data.insert(field, value);
        }
        updated.updated_at = Utc::now();
        updated.revision = revision;

        if entry.violates_unique(&updated) {
            return Err(StoreError::Conflict);
        }

        entry.documents[position] = updated.clone();

        Ok(updated)
    }

    async fn delete_document(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<(), StoreError> {
        let mut collections =
            self.collections.write().map_err(|_| lock_poisoned())?;
        let entry = collections
            .get_mut(collection)
            .ok_or(StoreError::NotFound)?;

        let before = entry.documents.len();
        entry.documents.retain(|document| document.id != id);

        if entry.documents.len() == before {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn create_file(
        &self,
        bucket: &str,
        _filename: &str,
        bytes: ::bytes::Bytes,
    ) -> Result<String, StoreError> {
        let file_id = ::uuid::Uuid::new_v4().simple().to_string();

        self.files
            .write()
            .map_err(|_| lock_poisoned())?
            .insert((bucket.to_string(), file_id.clone()), bytes);

        Ok(file_id)
    }

    async fn delete_file(
        &self,
        bucket: &str,
        file_id: &str,
    ) -> Result<(), StoreError> {
        self.files
            .write()
            .map_err(|_| lock_poisoned())?
            .remove(&(bucket.to_string(), file_id.to_string()))
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }

    fn file_view_url(&self, bucket: &str, file_id: &str) -> String {
        format!("memory://{}/{}", bucket, file_id)
    }
}
