//! Services over the document store.
//!
//! Read operations never fail: store errors are logged and an empty value
//! is returned. Mutations return `ServiceError`.

pub mod blog;
pub mod comments;
pub mod content;
pub mod engagement;
pub mod profiles;

use ::std::sync::Arc;

use crate::accounts::AccountProvider;
use crate::model::Collections;
use crate::store::{DocumentStore, StoreError};

#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn DocumentStore>,
    accounts: Arc<dyn AccountProvider>,
    collections: Collections,
}

impl Repository {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        accounts: Arc<dyn AccountProvider>,
        collections: Collections,
    ) -> Self {
        Self {
            store,
            accounts,
            collections,
        }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn accounts(&self) -> &Arc<dyn AccountProvider> {
        &self.accounts
    }

    pub fn collections(&self) -> &Collections {
        &self.collections
    }
}

/// Unwraps a read result, logging the failure and substituting the
/// default value.
fn or_default<T: Default>(result: Result<T, StoreError>, operation: &str) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            ::log::error!("{} failed: {}", operation, err);
            T::default()
        }
    }
}

/// Like `or_default` but a missing document is not worth logging.
fn or_none<T>(result: Result<T, StoreError>, operation: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(StoreError::NotFound) => None,
        Err(err) => {
            ::log::error!("{} failed: {}", operation, err);
            None
        }
    }
}

fn now() -> ::serde_json::Value {
    ::serde_json::Value::String(crate::store::format_timestamp(
        ::chrono::Utc::now(),
    ))
}
