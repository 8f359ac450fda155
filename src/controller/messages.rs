use tokio::sync::oneshot;

use super::{FetchOutcome, FetchTicket, ListView};
use crate::domain::{UserDraft, UserId, UserPage};
use crate::error::{ControllerError, DirectoryError};

pub type ControllerResponse<T> = oneshot::Sender<Result<T, ControllerError>>;

/// Messages accepted by the user list service.
#[derive(Debug)]
pub enum ControllerRequest {
    Activate {
        respond_to: ControllerResponse<FetchOutcome>,
    },
    FetchPage {
        page: u32,
        respond_to: ControllerResponse<FetchOutcome>,
    },
    SetPage {
        delta: i64,
        respond_to: ControllerResponse<FetchOutcome>,
    },
    ApplySearch {
        query: String,
        respond_to: ControllerResponse<()>,
    },
    BeginEdit {
        id: UserId,
        respond_to: ControllerResponse<UserDraft>,
    },
    CommitEdit {
        draft: UserDraft,
        respond_to: ControllerResponse<()>,
    },
    CancelEdit {
        respond_to: ControllerResponse<()>,
    },
    DeleteUser {
        id: UserId,
        respond_to: ControllerResponse<()>,
    },
    View {
        respond_to: ControllerResponse<ListView>,
    },
    Shutdown,
}

/// Directory results posted back by the service's background tasks.
#[derive(Debug)]
pub(crate) enum Completion {
    PageLoaded {
        ticket: FetchTicket,
        result: Result<UserPage, DirectoryError>,
        respond_to: ControllerResponse<FetchOutcome>,
    },
    UpdateFinished {
        id: UserId,
        draft: UserDraft,
        result: Result<(), DirectoryError>,
        respond_to: ControllerResponse<()>,
    },
    DeleteFinished {
        id: UserId,
        result: Result<(), DirectoryError>,
        respond_to: ControllerResponse<()>,
    },
}
