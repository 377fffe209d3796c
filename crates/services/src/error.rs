//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors from the remote exam service client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ApiError {
    #[error("invalid username or password")]
    InvalidCredentials,
    #[error("cannot reach the exam server")]
    Unreachable,
    #[error("exam server returned status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `LoginService`, one per user-visible message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoginError {
    #[error("username and password are required")]
    MissingInput,
    #[error("invalid username or password")]
    AuthRejected,
    #[error("cannot connect to the exam server")]
    Unreachable,
    #[error("no exams available")]
    EmptyCatalog,
    #[error(transparent)]
    Api(ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl From<ApiError> for LoginError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidCredentials => Self::AuthRejected,
            ApiError::Unreachable => Self::Unreachable,
            other => Self::Api(other),
        }
    }
}

/// Errors emitted by `AttemptService`.
///
/// Fetch failures are intentionally absent: the service degrades to
/// placeholder questions instead of failing the attempt.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AttemptError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ResultsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ResultsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}
