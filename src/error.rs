use crate::store::StoreError;

#[derive(Debug)]
pub enum ServiceError {
    Validation(String),
    UsernameTaken,
    EmailTaken,
    NotFound,
    Forbidden,
    Unauthorized,
    Store(StoreError),
    Internal(::anyhow::Error),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn status(&self) -> ::warp::http::StatusCode {
        use ::warp::http::StatusCode;

        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::UsernameTaken | ServiceError::EmailTaken => {
                StatusCode::CONFLICT
            }
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::Unauthorized => StatusCode::UNAUTHORIZED,
            ServiceError::Store(_) | ServiceError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl ::std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
        match self {
            ServiceError::Validation(message) => f.write_str(message),
            ServiceError::UsernameTaken => {
                write!(f, "Username is already taken")
            }
            ServiceError::EmailTaken => {
                write!(f, "This email is already registered")
            }
            ServiceError::NotFound => write!(f, "Not found"),
            ServiceError::Forbidden => write!(f, "Forbidden"),
            ServiceError::Unauthorized => write!(f, "You must be logged in"),
            ServiceError::Store(err) => write!(f, "Backend error: {}", err),
            ServiceError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl ::std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => ServiceError::NotFound,
            other => ServiceError::Store(other),
        }
    }
}
