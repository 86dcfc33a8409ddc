pub mod appwrite;
pub mod interface;
pub mod memory;

use ::chrono::{DateTime, Utc};
use ::serde_json::{Map, Value};

pub use interface::DocumentStore;

pub type Fields = Map<String, Value>;

/// A raw document as held by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Changes on every write. Passed back to `update_document` as a
    /// precondition.
    pub revision: String,
    pub data: Fields,
}

impl Document {
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentList {
    /// Number of matches before `Limit` and `Offset` are applied.
    pub total: u64,
    pub documents: Vec<Document>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Equal(String, Value),
    NotEqual(String, Value),
    Search(String, String),
    OrderAsc(String),
    OrderDesc(String),
    Limit(u64),
    Offset(u64),
}

impl Query {
    pub fn equal(field: &str, value: impl Into<Value>) -> Self {
        Query::Equal(field.to_string(), value.into())
    }

    pub fn not_equal(field: &str, value: impl Into<Value>) -> Self {
        Query::NotEqual(field.to_string(), value.into())
    }

    pub fn search(field: &str, term: &str) -> Self {
        Query::Search(field.to_string(), term.to_string())
    }

    pub fn order_asc(field: &str) -> Self {
        Query::OrderAsc(field.to_string())
    }

    pub fn order_desc(field: &str) -> Self {
        Query::OrderDesc(field.to_string())
    }
}

#[derive(Debug)]
pub enum StoreError {
    NotFound,
    /// Unique index violation or failed revision precondition.
    Conflict,
    Other(::anyhow::Error),
}

impl ::std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            StoreError::NotFound => write!(f, "document not found"),
            StoreError::Conflict => write!(f, "document conflict"),
            StoreError::Other(err) => write!(f, "{:#}", err),
        }
    }
}

impl ::std::error::Error for StoreError {}

impl From<::anyhow::Error> for StoreError {
    fn from(err: ::anyhow::Error) -> Self {
        StoreError::Other(err)
    }
}

impl From<::reqwest::Error> for StoreError {
    fn from(err: ::reqwest::Error) -> Self {
        StoreError::Other(err.into())
    }
}

impl From<::serde_json::Error> for StoreError {
    fn from(err: ::serde_json::Error) -> Self {
        StoreError::Other(err.into())
    }
}

/// Field map of a `json!` object literal. Anything else yields no fields.
pub fn fields_from(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Fields::new(),
    }
}

/// Timestamps are written in one fixed format so that string ordering
/// matches time ordering.
pub fn format_timestamp(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(::chrono::SecondsFormat::Millis, true)
}

pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|time| time.with_timezone(&Utc))
}

pub fn make_store(
    config: &crate::config::Config,
) -> ::anyhow::Result<::std::sync::Arc<dyn DocumentStore>> {
    match config.store_interface {
        crate::config::StoreInterface::Appwrite => {
            Ok(::std::sync::Arc::new(appwrite::AppwriteStore::new(config)?))
        }
        crate::config::StoreInterface::Memory => {
            ::log::warn!("Using in-memory document store; data is not persisted");
            Ok(::std::sync::Arc::new(memory::MemoryStore::for_collections(
                &config.collections(),
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamps_sort_as_strings() {
        let earlier = parse_timestamp("2024-01-02T03:04:05.000Z").unwrap();
        let later = earlier + ::chrono::Duration::milliseconds(1500);
        assert!(format_timestamp(earlier) < format_timestamp(later));
        assert_eq!(
            parse_timestamp(&format_timestamp(later)),
            Some(later)
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
    }
}
