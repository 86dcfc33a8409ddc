use ::std::collections::HashMap;
use ::std::sync::RwLock;

use super::interface;
use crate::model::Session;
use crate::store::StoreError;

#[derive(Default)]
struct Accounts {
    users: HashMap<String, Session>,
    tokens: HashMap<String, String>,
}

/// Accounts and bearer tokens held in process. Passwords are accepted but
/// not kept; tokens are issued with `issue_token`.
#[derive(Default)]
pub struct MemoryAccounts {
    inner: RwLock<Accounts>,
}

fn lock_poisoned() -> StoreError {
    StoreError::Other(::anyhow::anyhow!("account lock poisoned"))
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue_token(&self, user_id: &str) -> Option<String> {
        let mut inner = self.inner.write().ok()?;

        if !inner.users.contains_key(user_id) {
            return None;
        }

        let token = ::uuid::Uuid::new_v4().simple().to_string();
        inner.tokens.insert(token.clone(), user_id.to_string());
        Some(token)
    }

    pub fn account_count(&self) -> usize {
        self.inner.read().map(|inner| inner.users.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl interface::AccountProvider for MemoryAccounts {
    async fn create_account(
        &self,
        email: &str,
        _password: &str,
        name: &str,
    ) -> Result<String, StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        if inner
            .users
            .values()
            .any(|user| user.email.eq_ignore_ascii_case(email))
        {
            return Err(StoreError::Conflict);
        }

        let user_id = ::uuid::Uuid::new_v4().simple().to_string();
        inner.users.insert(
            user_id.clone(),
            Session {
                user_id: user_id.clone(),
                name: name.to_string(),
                email: email.to_string(),
            },
        );

        Ok(user_id)
    }

    async fn delete_account(&self, user_id: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.write().map_err(|_| lock_poisoned())?;

        inner.users.remove(user_id).ok_or(StoreError::NotFound)?;
        inner.tokens.retain(|_, owner| owner != user_id);

        Ok(())
    }

    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Session>, StoreError> {
        let inner = self.inner.read().map_err(|_| lock_poisoned())?;

        Ok(inner
            .tokens
            .get(token)
            .and_then(|user_id| inner.users.get(user_id))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountProvider;

    #[tokio::test]
    async fn test_duplicate_email() {
        let accounts = MemoryAccounts::new();
        accounts
            .create_account("a@example.com", "password1", "A")
            .await
            .unwrap();

        let duplicate = accounts
            .create_account("A@example.com", "password1", "A")
            .await;
        assert!(matches!(duplicate, Err(StoreError::Conflict)));
    }

    #[tokio::test]
    async fn test_tokens() {
        let accounts = MemoryAccounts::new();
        let user_id = accounts
            .create_account("a@example.com", "password1", "A")
            .await
            .unwrap();

        assert!(accounts.issue_token("someone-else").is_none());

        let token = accounts.issue_token(&user_id).unwrap();
        let session = accounts.resolve_session(&token).await.unwrap().unwrap();
        assert_eq!(session.user_id, user_id);

        accounts.delete_account(&user_id).await.unwrap();
        assert!(accounts.resolve_session(&token).await.unwrap().is_none());
    }
}
