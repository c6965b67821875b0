// castweb library root

pub mod cast;
pub mod cli;
pub mod config;
pub mod library;
pub mod routes;
pub mod server;
pub mod storage;
pub mod util;

// Re-exports
pub use config::Config;
pub use library::{Library, Listing};
pub use server::AppState;
pub use storage::Storage;

// Common types and utilities
pub mod error {
    use axum::{
        http::StatusCode,
        response::{IntoResponse, Response},
    };

    pub type Result<T> = std::result::Result<T, Error>;

    #[derive(Debug, thiserror::Error)]
    pub enum Error {
        #[error("IO error: {0}")]
        Io(#[from] std::io::Error),

        #[error("JSON error: {0}")]
        Json(#[from] serde_json::Error),

        #[error("Config error: {0}")]
        Config(String),

        #[error("Metadata error: {0}")]
        Metadata(String),

        #[error("Not found: {0}")]
        NotFound(String),

        #[error("{0}")]
        BadRequest(String),

        #[error("Forbidden: {0}")]
        Forbidden(String),

        #[error("Upstream error: {0}")]
        BadGateway(String),

        #[error("Internal server error: {0}")]
        Internal(String),
    }

    impl IntoResponse for Error {
        fn into_response(self) -> Response {
            let status = match &self {
                Error::NotFound(_) => StatusCode::NOT_FOUND,
                Error::BadRequest(_) => StatusCode::BAD_REQUEST,
                Error::Forbidden(_) => StatusCode::FORBIDDEN,
                Error::BadGateway(_) => StatusCode::BAD_GATEWAY,
                Error::Io(_) | Error::Json(_) | Error::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                Error::Config(_) | Error::Metadata(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };

            if status.is_server_error() {
                tracing::error!("{}", self);
            }

            (status, self.to_string()).into_response()
        }
    }
}
