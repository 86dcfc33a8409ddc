use ::regex::Regex;
use ::serde::{Deserialize, Serialize};
use ::serde_json::Value;

use crate::error::ServiceError;
use crate::mapper;
use crate::model::{fields, Content, UserProfile};
use crate::store::{Document, Fields, Query, StoreError};

pub const AUTHORS_PER_PAGE: u64 = 12;
pub const MAX_AVATAR_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_PASSWORD_LENGTH: usize = 8;

const USERNAME_PATTERN: &str = r"^[A-Za-z0-9_]{3,30}$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub username: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsPage {
    pub users: Vec<UserProfile>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorPage {
    pub profile: UserProfile,
    pub works: Vec<Content>,
}

fn pattern(source: &str) -> Result<Regex, ServiceError> {
    Regex::new(source)
        .map_err(|err| ServiceError::Internal(err.into()))
}

fn validate_username(username: &str) -> Result<(), ServiceError> {
    if !pattern(USERNAME_PATTERN)?.is_match(username) {
        return Err(ServiceError::validation(
            "Username must be 3-30 letters, numbers, or underscores",
        ));
    }
    Ok(())
}

impl RegisterForm {
    pub fn validate(&self) -> Result<(), ServiceError> {
        let required = [
            &self.first_name,
            &self.last_name,
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(ServiceError::validation("All fields are required"));
        }

        validate_username(&self.username)?;

        if !pattern(EMAIL_PATTERN)?.is_match(self.email.trim()) {
            return Err(ServiceError::validation(
                "Please enter a valid email address",
            ));
        }

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ServiceError::validation(
                "Password must be at least 8 characters",
            ));
        }

        if self.password != self.confirm_password {
            return Err(ServiceError::validation("Passwords do not match"));
        }

        Ok(())
    }

    fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let name = name.trim();

        if name.is_empty() {
            self.username.clone()
        } else {
            name.to_string()
        }
    }
}

impl super::Repository {
    fn profile_view(&self, document: &Document) -> UserProfile {
        let mut profile = mapper::document_to_profile(document);
        profile.avatar_url = profile.avatar_file_id.as_deref().map(|file_id| {
            self.store
                .file_view_url(&self.collections.profile_pictures, file_id)
        });
        profile
    }

    async fn find_profile(
        &self,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let list = self
            .store
            .list_documents(
                &self.collections.user_profiles,
                &[Query::equal(field, value), Query::Limit(1)],
            )
            .await?;

        Ok(list.documents.into_iter().next())
    }

    async fn username_taken(&self, username: &str) -> Result<bool, StoreError> {
        Ok(self.find_profile(fields::USERNAME, username).await?.is_some())
    }

    /// Creates the authentication account and then the profile. If the
    /// profile cannot be written the account is removed again.
    pub async fn register(
        &self,
        form: RegisterForm,
    ) -> Result<UserProfile, ServiceError> {
        form.validate()?;

        if self.username_taken(&form.username).await? {
            return Err(ServiceError::UsernameTaken);
        }

        let display_name = form.display_name();

        let user_id = match self
            .accounts
            .create_account(form.email.trim(), &form.password, &display_name)
            .await
        {
            Ok(user_id) => user_id,
            Err(StoreError::Conflict) => return Err(ServiceError::EmailTaken),
            Err(err) => return Err(err.into()),
        };

        let mut data = Fields::new();
        data.insert(fields::USER_ID.into(), user_id.clone().into());
        data.insert(fields::USERNAME.into(), form.username.clone().into());
        data.insert(fields::DISPLAY_NAME.into(), display_name.into());
        data.insert(fields::BIO.into(), "".into());

        let result = self
            .store
            .create_document(&self.collections.user_profiles, None, data)
            .await;

        match result {
            Ok(document) => {
                ::log::info!("registered {} as {}", form.username, user_id);
                Ok(self.profile_view(&document))
            }
            Err(err) => {
                if let Err(rollback) = self.accounts.delete_account(&user_id).await
                {
                    ::log::error!(
                        "failed to remove account {} after profile error: {}",
                        user_id,
                        rollback
                    );
                }

                match err {
                    StoreError::Conflict => Err(ServiceError::UsernameTaken),
                    err => Err(err.into()),
                }
            }
        }
    }

    pub async fn get_profile_by_username(
        &self,
        username: &str,
    ) -> Option<UserProfile> {
        super::or_default(
            self.find_profile(fields::USERNAME, username).await,
            "get_profile_by_username",
        )
        .map(|document| self.profile_view(&document))
    }

    pub async fn get_profile_by_user_id(&self, user_id: &str) -> Option<UserProfile> {
        super::or_default(
            self.find_profile(fields::USER_ID, user_id).await,
            "get_profile_by_user_id",
        )
        .map(|document| self.profile_view(&document))
    }

    async fn own_profile(&self, user_id: &str) -> Result<Document, ServiceError> {
        self.find_profile(fields::USER_ID, user_id)
            .await?
            .ok_or(ServiceError::NotFound)
    }

    pub async fn update_profile(
        &self,
        user_id: &str,
        update: ProfileUpdate,
    ) -> Result<UserProfile, ServiceError> {
        let document = self.own_profile(user_id).await?;

        let mut data = Fields::new();

        if let Some(username) = update.username {
            if document.str_field(fields::USERNAME) != Some(username.as_str()) {
                validate_username(&username)?;
                if self.username_taken(&username).await? {
                    return Err(ServiceError::UsernameTaken);
                }
                data.insert(fields::USERNAME.into(), username.into());
            }
        }
        if let Some(display_name) = update.display_name {
            data.insert(
                fields::DISPLAY_NAME.into(),
                display_name.trim().to_string().into(),
            );
        }
        if let Some(bio) = update.bio {
            data.insert(fields::BIO.into(), bio.into());
        }

        if data.is_empty() {
            return Ok(self.profile_view(&document));
        }

        match self
            .store
            .update_document(&self.collections.user_profiles, &document.id, data, None)
            .await
        {
            Ok(updated) => Ok(self.profile_view(&updated)),
            Err(StoreError::Conflict) => Err(ServiceError::UsernameTaken),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_avatar_file(&self, file_id: &str) {
        if let Err(err) = self
            .store
            .delete_file(&self.collections.profile_pictures, file_id)
            .await
        {
            ::log::warn!("failed to delete avatar {}: {}", file_id, err);
        }
    }

    /// Uploads a new avatar and drops the previous one.
    pub async fn set_avatar(
        &self,
        user_id: &str,
        filename: &str,
        bytes: ::bytes::Bytes,
    ) -> Result<UserProfile, ServiceError> {
        if bytes.is_empty() {
            return Err(ServiceError::validation("Avatar image is empty"));
        }
        if bytes.len() > MAX_AVATAR_BYTES {
            return Err(ServiceError::validation(
                "Avatar image must be 5 MB or smaller",
            ));
        }

        let document = self.own_profile(user_id).await?;
        let previous = mapper::document_to_profile(&document).avatar_file_id;

        let file_id = self
            .store
            .create_file(&self.collections.profile_pictures, filename, bytes)
            .await?;

        let mut data = Fields::new();
        data.insert(fields::AVATAR_FILE_ID.into(), file_id.clone().into());

        let updated = match self
            .store
            .update_document(&self.collections.user_profiles, &document.id, data, None)
            .await
        {
            Ok(updated) => updated,
            Err(err) => {
                self.delete_avatar_file(&file_id).await;
                return Err(err.into());
            }
        };

        if let Some(previous) = previous {
            self.delete_avatar_file(&previous).await;
        }

        Ok(self.profile_view(&updated))
    }

    pub async fn remove_avatar(&self, user_id: &str) -> Result<UserProfile, ServiceError> {
        let document = self.own_profile(user_id).await?;

        let Some(file_id) = mapper::document_to_profile(&document).avatar_file_id
        else {
            return Ok(self.profile_view(&document));
        };

        let mut data = Fields::new();
        data.insert(fields::AVATAR_FILE_ID.into(), Value::Null);

        let updated = self
            .store
            .update_document(&self.collections.user_profiles, &document.id, data, None)
            .await?;

        self.delete_avatar_file(&file_id).await;

        Ok(self.profile_view(&updated))
    }

    /// One page of the authors directory, ordered by username. `query`
    /// narrows it to usernames containing the term.
    pub async fn list_authors(&self, page: u64, query: Option<&str>) -> AuthorsPage {
        let page = page.max(1);

        let mut queries = vec![];
        if let Some(term) = query.map(str::trim).filter(|term| !term.is_empty()) {
            queries.push(Query::search(fields::USERNAME, term));
        }
        queries.push(Query::order_asc(fields::USERNAME));
        queries.push(Query::Limit(AUTHORS_PER_PAGE));
        queries.push(Query::Offset((page - 1) * AUTHORS_PER_PAGE));

        let result = self
            .store
            .list_documents(&self.collections.user_profiles, &queries)
            .await;

        let (users, total) = match result {
            Ok(list) => (
                list.documents
                    .iter()
                    .map(|document| self.profile_view(document))
                    .collect(),
                list.total,
            ),
            Err(err) => {
                ::log::error!("list_authors failed: {}", err);
                (vec![], 0)
            }
        };

        AuthorsPage {
            users,
            total,
            page,
            total_pages: total.div_ceil(AUTHORS_PER_PAGE).max(1),
        }
    }

    /// A profile together with its published works.
    pub async fn author_page(&self, username: &str) -> Option<AuthorPage> {
        let mut profile = self.get_profile_by_username(username).await?;
        let works = self.list_by_author(&profile.user_id).await;
        profile.publication_count = Some(works.len() as u64);

        Some(AuthorPage { profile, works })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegisterForm {
        RegisterForm {
            first_name: "Alice".to_string(),
            last_name: "Liddell".to_string(),
            username: "alice123".to_string(),
            email: "alice@example.com".to_string(),
            password: "wonderland".to_string(),
            confirm_password: "wonderland".to_string(),
        }
    }

    fn rejected(form: RegisterForm) -> bool {
        matches!(form.validate(), Err(ServiceError::Validation(_)))
    }

    #[test]
    fn test_valid_form() {
        assert!(form().validate().is_ok());
        assert_eq!(form().display_name(), "Alice Liddell");
    }

    #[test]
    fn test_missing_fields() {
        assert!(rejected(RegisterForm {
            first_name: " ".to_string(),
            ..form()
        }));
        assert!(rejected(RegisterForm {
            confirm_password: "".to_string(),
            ..form()
        }));
    }

    #[test]
    fn test_username_format() {
        assert!(rejected(RegisterForm {
            username: "al".to_string(),
            ..form()
        }));
        assert!(rejected(RegisterForm {
            username: "alice-123".to_string(),
            ..form()
        }));
        assert!(rejected(RegisterForm {
            username: "a".repeat(31),
            ..form()
        }));
        assert!(!rejected(RegisterForm {
            username: "Alice_Liddell_1865".to_string(),
            ..form()
        }));
    }

    #[test]
    fn test_email_format() {
        for email in ["alice", "alice@", "alice@example", "a b@example.com"] {
            assert!(
                rejected(RegisterForm {
                    email: email.to_string(),
                    ..form()
                }),
                "{}",
                email
            );
        }
    }

    #[test]
    fn test_passwords() {
        assert!(rejected(RegisterForm {
            password: "short".to_string(),
            confirm_password: "short".to_string(),
            ..form()
        }));
        assert!(rejected(RegisterForm {
            confirm_password: "wonderlands".to_string(),
            ..form()
        }));
    }

    #[test]
    fn test_register_form_field_names() {
        let form: RegisterForm = ::serde_json::from_value(::serde_json::json!({
            "firstName": "Alice",
            "lastName": "Liddell",
            "username": "alice123",
            "email": "alice@example.com",
            "password": "wonderland",
            "confirmPassword": "wonderland",
        }))
        .unwrap();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_bad_pattern_is_internal_error() {
        let err = pattern("(").unwrap_err();
        assert!(matches!(err, ServiceError::Internal(_)));
        assert_eq!(
            err.status(),
            ::warp::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(err.to_string(), "Internal server error");
    }
}
