use ::anyhow::Context;
use ::reqwest::{Method, StatusCode};
use ::serde_json::{json, Value};

use super::interface;
use crate::model::Session;
use crate::store::appwrite::{check_status, AppwriteClient};
use crate::store::StoreError;

pub struct AppwriteAccounts {
    client: AppwriteClient,
}

impl AppwriteAccounts {
    pub fn new(config: &crate::config::Config) -> ::anyhow::Result<Self> {
        Ok(Self {
            client: AppwriteClient::new(config)?,
        })
    }
}

fn session_from_json(body: &Value) -> Option<Session> {
    Some(Session {
        user_id: body.get("$id")?.as_str()?.to_string(),
        name: body
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        email: body
            .get("email")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

#[async_trait::async_trait]
impl interface::AccountProvider for AppwriteAccounts {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<String, StoreError> {
        let response = self
            .client
            .request(Method::POST, "/users")
            .json(&json!({
                "userId": "unique()",
                "email": email,
                "password": password,
                "name": name,
            }))
            .send()
            .await?;

        let body = check_status(response).await?.json::<Value>().await?;

        Ok(body
            .get("$id")
            .and_then(Value::as_str)
            .context("user response without $id")?
            .to_string())
    }

    async fn delete_account(&self, user_id: &str) -> Result<(), StoreError> {
        let response = self
            .client
            .request(Method::DELETE, &format!("/users/{}", user_id))
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    async fn resolve_session(
        &self,
        token: &str,
    ) -> Result<Option<Session>, StoreError> {
        let response = self
            .client
            .request_as_user(Method::GET, "/account", token)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }

        let body = check_status(response).await?.json::<Value>().await?;

        Ok(session_from_json(&body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_from_account() {
        let session = session_from_json(&json!({
            "$id": "u1",
            "name": "Emily Dickinson",
            "email": "emily@example.com",
            "status": true,
        }))
        .unwrap();

        assert_eq!(session.user_id, "u1");
        assert_eq!(session.name, "Emily Dickinson");
    }

    #[test]
    fn test_session_requires_id() {
        assert!(session_from_json(&json!({"name": "x"})).is_none());
    }
}
