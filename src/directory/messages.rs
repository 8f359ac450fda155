use tokio::sync::oneshot;

use crate::domain::{Credentials, SessionToken, UserDraft, UserId, UserPage};
use crate::error::DirectoryError;

pub type DirectoryResponse<T> = oneshot::Sender<Result<T, DirectoryError>>;

/// Requests served by the directory actor, one per REST call.
#[derive(Debug)]
pub enum DirectoryRequest {
    FetchPage {
        page: u32,
        respond_to: DirectoryResponse<UserPage>,
    },
    UpdateUser {
        id: UserId,
        draft: UserDraft,
        respond_to: DirectoryResponse<()>,
    },
    DeleteUser {
        id: UserId,
        respond_to: DirectoryResponse<()>,
    },
    Login {
        credentials: Credentials,
        respond_to: DirectoryResponse<SessionToken>,
    },
}
