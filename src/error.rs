use thiserror::Error;

use crate::domain::UserId;

/// Errors talking to the remote user directory.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DirectoryError {
    #[error("Directory request failed: {0}")]
    Http(String),
    #[error("Directory returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Directory response could not be decoded: {0}")]
    Decode(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<reqwest::Error> for DirectoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            DirectoryError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            DirectoryError::Status {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            DirectoryError::Http(err.to_string())
        }
    }
}

/// Errors returned by the user list controller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ControllerError {
    #[error("No session token, login required")]
    Unauthenticated,
    #[error("User not found on the current page: {0}")]
    UserNotFound(UserId),
    #[error("No edit in progress")]
    NoEditInProgress,
    #[error("An update for user {0} is already in flight")]
    CommitInProgress(UserId),
    #[error("Invalid draft: {0}")]
    InvalidDraft(String),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors reading or writing the stored session token.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session store I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Refusing to store an empty session token")]
    Empty,
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}
