//! # Mock Framework
//!
//! Utilities for testing code that talks to the directory without a server.
//!
//! Use [`create_mock_directory`] to get a client and a receiver.
//! Then use helpers like [`expect_fetch_page`] or [`expect_delete`] to assert
//! the request and script the directory's answer through the responder.

use tokio::sync::mpsc;

use crate::directory::{DirectoryClient, DirectoryRequest, DirectoryResponse};
use crate::domain::{Credentials, SessionToken, UserDraft, UserId, UserPage};

/// Creates a directory client whose requests land on the returned receiver.
///
/// Holding responders lets a test decide when and in which order the
/// "server" answers, which is how stale-response races are reproduced.
pub fn create_mock_directory(buffer_size: usize) -> (DirectoryClient, mpsc::Receiver<DirectoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (DirectoryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a FetchPage request
pub async fn expect_fetch_page(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(u32, DirectoryResponse<UserPage>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::FetchPage { page, respond_to }) => Some((page, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an UpdateUser request
pub async fn expect_update(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(UserId, UserDraft, DirectoryResponse<()>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::UpdateUser { id, draft, respond_to }) => Some((id, draft, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a DeleteUser request
pub async fn expect_delete(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(UserId, DirectoryResponse<()>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::DeleteUser { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Login request
pub async fn expect_login(
    receiver: &mut mpsc::Receiver<DirectoryRequest>,
) -> Option<(Credentials, DirectoryResponse<SessionToken>)> {
    match receiver.recv().await {
        Some(DirectoryRequest::Login { credentials, respond_to }) => Some((credentials, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[tokio::test]
    async fn test_mock_directory() {
        let (client, mut receiver) = create_mock_directory(10);

        let fetch_task = tokio::spawn(async move { client.fetch_page(3).await });

        let (page, responder) = expect_fetch_page(&mut receiver).await.expect("Expected FetchPage request");
        assert_eq!(page, 3);
        let served = UserPage::new(3, 3, vec![User::new(13, "Ada", "Lovelace", "ada@example.com")]);
        responder.send(Ok(served.clone())).unwrap();

        let result = fetch_task.await.unwrap();
        assert_eq!(result, Ok(served));
    }
}
