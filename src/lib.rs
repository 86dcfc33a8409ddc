pub mod accounts;
pub mod config;
pub mod error;
pub(crate) mod handlers;
pub mod mapper;
pub mod model;
pub mod repository;
pub mod routes;
pub mod store;
pub mod utils;

pub mod version {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
}

pub struct State {
    pub repository: repository::Repository,
}

impl State {
    pub fn new(repository: repository::Repository) -> Self {
        Self { repository }
    }
}

/// Returns early from a warp handler with a 500 reply when `$expr` is an
/// `Err`.
#[macro_export]
macro_rules! warp_try_err_500 {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => {
                ::log::error!("{}", err);
                return Ok(Box::new($crate::handlers::error_reply(
                    "Internal server error",
                    ::warp::http::StatusCode::INTERNAL_SERVER_ERROR,
                )));
            }
        }
    };
}

/// Returns early from a warp handler with a 400 reply carrying the error
/// message when `$expr` is an `Err`.
#[macro_export]
macro_rules! warp_try_err_400 {
    ($expr:expr) => {
        match $expr {
            Ok(value) => value,
            Err(err) => {
                return Ok(Box::new($crate::handlers::error_reply(
                    &err.to_string(),
                    ::warp::http::StatusCode::BAD_REQUEST,
                )));
            }
        }
    };
}
