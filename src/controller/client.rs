use tokio::sync::{broadcast, mpsc};
use tracing::{debug, instrument};

use super::{ControllerRequest, FetchOutcome, ListView};
use crate::domain::{Notification, UserDraft, UserId};
use crate::error::ControllerError;

/// Client for the user list service.
#[derive(Clone)]
pub struct UserListClient {
    sender: mpsc::Sender<ControllerRequest>,
    notifications: broadcast::Sender<Notification>,
}

impl UserListClient {
    pub fn new(
        sender: mpsc::Sender<ControllerRequest>,
        notifications: broadcast::Sender<Notification>,
    ) -> Self {
        Self {
            sender,
            notifications,
        }
    }

    /// Receiver for success/error notifications emitted after mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifications.subscribe()
    }

    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), ControllerError> {
        debug!("Sending shutdown request");
        self.sender
            .send(ControllerRequest::Shutdown)
            .await
            .map_err(|e| ControllerError::ActorCommunicationError(e.to_string()))
    }
}

client_method!(UserListClient => fn activate() -> FetchOutcome as ControllerRequest::Activate, Error = ControllerError);
client_method!(UserListClient => fn fetch_page(page: u32) -> FetchOutcome as ControllerRequest::FetchPage, Error = ControllerError);
client_method!(UserListClient => fn set_page(delta: i64) -> FetchOutcome as ControllerRequest::SetPage, Error = ControllerError);
client_method!(UserListClient => fn apply_search(query: String) -> () as ControllerRequest::ApplySearch, Error = ControllerError);
client_method!(UserListClient => fn begin_edit(id: UserId) -> UserDraft as ControllerRequest::BeginEdit, Error = ControllerError);
client_method!(UserListClient => fn commit_edit(draft: UserDraft) -> () as ControllerRequest::CommitEdit, Error = ControllerError);
client_method!(UserListClient => fn cancel_edit() -> () as ControllerRequest::CancelEdit, Error = ControllerError);
client_method!(UserListClient => fn delete_user(id: UserId) -> () as ControllerRequest::DeleteUser, Error = ControllerError);
client_method!(UserListClient => fn view() -> ListView as ControllerRequest::View, Error = ControllerError);
