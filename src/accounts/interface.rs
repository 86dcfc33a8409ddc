use crate::model::Session;
use crate::store::StoreError;

/// The backend's authentication service.
#[async_trait::async_trait]
pub trait AccountProvider: Send + Sync {
    /// Returns the new user id. `StoreError::Conflict` means the email is
    /// already registered.
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, StoreError>;

    async fn delete_account(&self, user_id: &str) -> Result<(), StoreError>;

    /// Resolves a bearer token. `None` for unknown or expired tokens.
    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Session>, StoreError>;
}
