use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::config::Config;
use crate::controller::{UserListClient, UserListService};
use crate::directory::{DirectoryClient, DirectoryService, HttpDirectory};
use crate::error::DirectoryError;
use crate::session::SessionProvider;

/// Starts the directory and controller actors and wires them together.
pub struct DirectorySystem {
    pub directory: DirectoryClient,
    handles: Vec<JoinHandle<()>>,
}

impl DirectorySystem {
    /// Starts the directory actor against the configured REST backend.
    pub fn start(config: &Config) -> Result<Self, DirectoryError> {
        let backend = HttpDirectory::new(&config.api.base_url, config.api.api_key.as_deref())?;
        let (service, directory) = DirectoryService::new(config.api.mailbox_size.max(1), backend);
        let handle = tokio::spawn(service.run());
        info!(base_url = %config.api.base_url, "Directory system started");
        Ok(Self {
            directory,
            handles: vec![handle],
        })
    }

    /// Starts a user list view bound to this system's directory.
    pub fn open_user_list(
        &mut self,
        config: &Config,
        session: Arc<dyn SessionProvider>,
    ) -> UserListClient {
        let (service, client) =
            UserListService::new(&config.controller, self.directory.clone(), session);
        self.handles.push(tokio::spawn(service.run()));
        client
    }

    /// Drops the system's directory handle and waits for every actor.
    ///
    /// Controller clients must be shut down or dropped first, otherwise their
    /// actors keep the directory alive.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.directory);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
