use tokio::sync::mpsc;

use super::DirectoryRequest;
use crate::domain::{Credentials, SessionToken, UserDraft, UserId, UserPage};
use crate::error::DirectoryError;

/// Client for the directory actor.
#[derive(Clone)]
pub struct DirectoryClient {
    sender: mpsc::Sender<DirectoryRequest>,
}

impl DirectoryClient {
    pub fn new(sender: mpsc::Sender<DirectoryRequest>) -> Self {
        Self { sender }
    }
}

client_method!(DirectoryClient => fn fetch_page(page: u32) -> UserPage as DirectoryRequest::FetchPage, Error = DirectoryError);
client_method!(DirectoryClient => fn update_user(id: UserId, draft: UserDraft) -> () as DirectoryRequest::UpdateUser, Error = DirectoryError);
client_method!(DirectoryClient => fn delete_user(id: UserId) -> () as DirectoryRequest::DeleteUser, Error = DirectoryError);
client_method!(DirectoryClient => fn login(credentials: Credentials) -> SessionToken as DirectoryRequest::Login, Error = DirectoryError);
