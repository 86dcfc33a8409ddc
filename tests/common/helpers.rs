use ::std::sync::Arc;

use ::serde_json::{json, Value};

use verses::accounts::memory::MemoryAccounts;
use verses::model::{Collections, Content, ContentType, UserProfile};
use verses::repository::content::NewContent;
use verses::repository::profiles::RegisterForm;
use verses::repository::Repository;
use verses::store::memory::MemoryStore;
use verses::store::{fields_from, DocumentStore};

use super::failing_store::FailingStore;

pub const PASSWORD: &str = "password123";

/// A repository over in-memory providers.
pub struct TestSetup {
    pub store: Arc<MemoryStore>,
    pub accounts: Arc<MemoryAccounts>,
    pub collections: Collections,
    pub repository: Repository,
    pub state: Arc<verses::State>,
}

impl TestSetup {
    pub fn new() -> Self {
        let collections = Collections::default();
        let store = Arc::new(MemoryStore::for_collections(&collections));
        Self::over(store.clone(), store, collections)
    }

    /// Like `new`, but the repository reads and writes through a store that
    /// can be told to fail.
    pub fn with_failing_store() -> (Self, Arc<FailingStore>) {
        let collections = Collections::default();
        let store = Arc::new(MemoryStore::for_collections(&collections));
        let failing = Arc::new(FailingStore::new(store.clone()));
        (Self::over(store, failing.clone(), collections), failing)
    }

    fn over(
        store: Arc<MemoryStore>,
        document_store: Arc<dyn DocumentStore>,
        collections: Collections,
    ) -> Self {
        let accounts = Arc::new(MemoryAccounts::new());

        let repository = Repository::new(
            document_store,
            accounts.clone(),
            collections.clone(),
        );

        let state = Arc::new(verses::State::new(repository.clone()));

        Self {
            store,
            accounts,
            collections,
            repository,
            state,
        }
    }

    pub fn register_form(username: &str) -> RegisterForm {
        RegisterForm {
            first_name: "Test".to_string(),
            last_name: "Writer".to_string(),
            username: username.to_string(),
            email: format!("{}@example.com", username.to_lowercase()),
            password: PASSWORD.to_string(),
            confirm_password: PASSWORD.to_string(),
        }
    }

    pub async fn register(&self, username: &str) -> UserProfile {
        self.repository
            .register(Self::register_form(username))
            .await
            .expect("registration failed")
    }

    /// Registers a user and returns the profile with a bearer token.
    pub async fn login(&self, username: &str) -> (UserProfile, String) {
        let profile = self.register(username).await;
        let token = self
            .accounts
            .issue_token(&profile.user_id)
            .expect("account missing");
        (profile, token)
    }

    pub async fn publish(
        &self,
        author: &UserProfile,
        title: &str,
        body: &str,
        content_type: ContentType,
    ) -> Content {
        self.repository
            .publish(
                &author.user_id,
                &author.username,
                NewContent {
                    title: title.to_string(),
                    body: body.to_string(),
                    content_type,
                },
            )
            .await
            .expect("publish failed")
    }

    /// Writes a raw content document, for fixtures that need exact field
    /// values.
    pub async fn insert_content(&self, data: Value) -> String {
        self.store
            .create_document(&self.collections.content, None, fields_from(data))
            .await
            .expect("insert failed")
            .id
    }

    pub async fn content_document(&self, id: &str) -> Value {
        let document = self
            .store
            .get_document(&self.collections.content, id)
            .await
            .expect("content missing");
        Value::Object(document.data)
    }
}

pub fn content_fixture(title: &str, content_type: &str, published_at: &str) -> Value {
    json!({
        "title": title,
        "body": format!("Body of {}", title),
        "type": content_type,
        "userId": "fixture-user",
        "username": "fixture",
        "PublishedAt": published_at,
        "likes": 0,
        "likedBy": [],
        "commentCount": 0,
    })
}
