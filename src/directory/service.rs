use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use super::{DirectoryClient, DirectoryRequest, HttpDirectory};

/// Actor that forwards [`DirectoryRequest`]s to the REST backend.
///
/// Every request runs on its own task which owns the reply channel, so a
/// slow page fetch never holds up a delete and responses may arrive out of
/// order.
pub struct DirectoryService {
    receiver: mpsc::Receiver<DirectoryRequest>,
    backend: HttpDirectory,
}

impl DirectoryService {
    pub fn new(buffer_size: usize, backend: HttpDirectory) -> (Self, DirectoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self { receiver, backend };
        (service, DirectoryClient::new(sender))
    }

    #[instrument(name = "directory_service", skip(self), fields(base_url = %self.backend.base_url()))]
    pub async fn run(mut self) {
        info!("DirectoryService starting");
        while let Some(msg) = self.receiver.recv().await {
            self.dispatch(msg);
        }
        info!("DirectoryService stopped");
    }

    fn dispatch(&self, msg: DirectoryRequest) {
        let backend = self.backend.clone();
        match msg {
            DirectoryRequest::FetchPage { page, respond_to } => {
                debug!(page, "Dispatching fetch_page");
                tokio::spawn(async move {
                    let result = backend.fetch_page(page).await;
                    if let Err(e) = &result {
                        error!(page, error = %e, "fetch_page failed");
                    }
                    let _ = respond_to.send(result);
                });
            }
            DirectoryRequest::UpdateUser { id, draft, respond_to } => {
                debug!(user_id = id, "Dispatching update_user");
                tokio::spawn(async move {
                    let result = backend.update_user(id, &draft).await;
                    if let Err(e) = &result {
                        error!(user_id = id, error = %e, "update_user failed");
                    }
                    let _ = respond_to.send(result);
                });
            }
            DirectoryRequest::DeleteUser { id, respond_to } => {
                debug!(user_id = id, "Dispatching delete_user");
                tokio::spawn(async move {
                    let result = backend.delete_user(id).await;
                    if let Err(e) = &result {
                        error!(user_id = id, error = %e, "delete_user failed");
                    }
                    let _ = respond_to.send(result);
                });
            }
            DirectoryRequest::Login { credentials, respond_to } => {
                debug!(email = %credentials.email, "Dispatching login");
                tokio::spawn(async move {
                    let result = backend.login(&credentials).await;
                    if let Err(e) = &result {
                        error!(error = %e, "login failed");
                    }
                    let _ = respond_to.send(result);
                });
            }
        }
    }
}
