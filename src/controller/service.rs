use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};
use tracing::{debug, error, info, instrument, warn};

use super::messages::Completion;
use super::{ControllerRequest, ControllerResponse, FetchOutcome, ListState, UserListClient};
use crate::config;
use crate::directory::DirectoryClient;
use crate::domain::{Notification, UserDraft, UserId, UserPage};
use crate::error::{ControllerError, DirectoryError};
use crate::session::SessionProvider;

pub const MSG_UPDATED: &str = "Successfully updated!";
pub const MSG_UPDATE_FAILED: &str = "Failed to update user";
pub const MSG_DELETED: &str = "User deleted successfully";
pub const MSG_DELETE_FAILED: &str = "Failed to delete user";
pub const MSG_FETCH_FAILED: &str = "Failed to load users";

/// Actor owning the list state of one user list view.
///
/// Requests are handled strictly one at a time. Handlers never await the
/// directory themselves: they spawn the call and the result comes back as a
/// [`Completion`], so searches and views are served while a request is out.
pub struct UserListService {
    receiver: mpsc::Receiver<ControllerRequest>,
    completions: mpsc::UnboundedReceiver<Completion>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    directory: DirectoryClient,
    session: Arc<dyn SessionProvider>,
    notifications: broadcast::Sender<Notification>,
    notify_fetch_failures: bool,
    state: ListState,
}

impl UserListService {
    pub fn new(
        settings: &config::Controller,
        directory: DirectoryClient,
        session: Arc<dyn SessionProvider>,
    ) -> (Self, UserListClient) {
        let (sender, receiver) = mpsc::channel(settings.mailbox_size.max(1));
        let (completion_tx, completions) = mpsc::unbounded_channel();
        let (notifications, _) = broadcast::channel(settings.notification_capacity.max(1));
        let service = Self {
            receiver,
            completions,
            completion_tx,
            directory,
            session,
            notifications: notifications.clone(),
            notify_fetch_failures: settings.notify_fetch_failures,
            state: ListState::new(),
        };
        (service, UserListClient::new(sender, notifications))
    }

    #[instrument(name = "user_list_service", skip(self))]
    pub async fn run(mut self) {
        info!("UserListService starting");

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(ControllerRequest::Shutdown) => {
                        info!("UserListService shutting down");
                        break;
                    }
                    Some(msg) => self.handle_request(msg),
                    None => break,
                },
                Some(done) = self.completions.recv() => self.handle_completion(done),
            }
        }

        info!("UserListService stopped");
    }

    fn handle_request(&mut self, msg: ControllerRequest) {
        match msg {
            ControllerRequest::Activate { respond_to } => self.handle_activate(respond_to),
            ControllerRequest::FetchPage { page, respond_to } => {
                self.handle_fetch_page(page, respond_to)
            }
            ControllerRequest::SetPage { delta, respond_to } => {
                self.handle_set_page(delta, respond_to)
            }
            ControllerRequest::ApplySearch { query, respond_to } => {
                self.handle_apply_search(query, respond_to)
            }
            ControllerRequest::BeginEdit { id, respond_to } => {
                self.handle_begin_edit(id, respond_to)
            }
            ControllerRequest::CommitEdit { draft, respond_to } => {
                self.handle_commit_edit(draft, respond_to)
            }
            ControllerRequest::CancelEdit { respond_to } => {
                debug!("Edit cancelled");
                self.state.cancel_edit();
                let _ = respond_to.send(Ok(()));
            }
            ControllerRequest::DeleteUser { id, respond_to } => {
                self.handle_delete_user(id, respond_to)
            }
            ControllerRequest::View { respond_to } => {
                let _ = respond_to.send(Ok(self.state.view()));
            }
            // Intercepted by the run loop.
            ControllerRequest::Shutdown => {}
        }
    }

    fn handle_completion(&mut self, done: Completion) {
        match done {
            Completion::PageLoaded {
                ticket,
                result,
                respond_to,
            } => self.handle_page_loaded(ticket.seq, ticket.page, result, respond_to),
            Completion::UpdateFinished {
                id,
                draft,
                result,
                respond_to,
            } => self.handle_update_finished(id, draft, result, respond_to),
            Completion::DeleteFinished {
                id,
                result,
                respond_to,
            } => self.handle_delete_finished(id, result, respond_to),
        }
    }

    /// Mount step of the view: refuse without a session, else load the page.
    #[instrument(skip(self, respond_to))]
    fn handle_activate(&mut self, respond_to: ControllerResponse<FetchOutcome>) {
        if !self.session.is_authenticated() {
            warn!("No session token, redirecting to login");
            send_error!(respond_to, ControllerError::Unauthenticated);
        }
        let page = self.state.current_page();
        self.start_fetch(page, respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_fetch_page(&mut self, page: u32, respond_to: ControllerResponse<FetchOutcome>) {
        self.start_fetch(page, respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_set_page(&mut self, delta: i64, respond_to: ControllerResponse<FetchOutcome>) {
        let target = self.state.page_target(delta);
        if target == self.state.current_page() {
            debug!(page = target, "Page unchanged");
            let _ = respond_to.send(Ok(FetchOutcome::Unchanged));
            return;
        }
        self.start_fetch(target, respond_to);
    }

    fn start_fetch(&mut self, page: u32, respond_to: ControllerResponse<FetchOutcome>) {
        let ticket = self.state.begin_fetch(page);
        debug!(page = ticket.page, seq = ticket.seq, "Requesting page");

        let directory = self.directory.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = directory.fetch_page(ticket.page).await;
            let _ = completion_tx.send(Completion::PageLoaded {
                ticket,
                result,
                respond_to,
            });
        });
    }

    #[instrument(skip(self, result, respond_to))]
    fn handle_page_loaded(
        &mut self,
        seq: u64,
        page: u32,
        result: Result<UserPage, DirectoryError>,
        respond_to: ControllerResponse<FetchOutcome>,
    ) {
        if !self.state.is_latest(seq) {
            debug!("Discarding response to superseded request");
            let _ = respond_to.send(Ok(FetchOutcome::Stale));
            return;
        }

        let outcome = match result {
            Ok(users) => {
                let count = users.data.len();
                self.state.apply_page(seq, users);
                info!(
                    user_count = count,
                    total_pages = self.state.total_pages(),
                    "Page loaded"
                );
                FetchOutcome::Applied
            }
            Err(e) => {
                error!(error = %e, "Error fetching users");
                if self.notify_fetch_failures {
                    self.notify(Notification::error(MSG_FETCH_FAILED));
                }
                FetchOutcome::Failed
            }
        };
        let _ = respond_to.send(Ok(outcome));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_apply_search(&mut self, query: String, respond_to: ControllerResponse<()>) {
        self.state.apply_search(&query);
        debug!(visible = self.state.visible().len(), "Search applied");
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_begin_edit(&mut self, id: UserId, respond_to: ControllerResponse<UserDraft>) {
        let result = self.state.begin_edit(id).cloned();
        if let Err(e) = &result {
            warn!(error = %e, "Cannot begin edit");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, draft, respond_to))]
    fn handle_commit_edit(&mut self, draft: UserDraft, respond_to: ControllerResponse<()>) {
        let id = match self.state.start_commit(draft.clone()) {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Cannot commit edit");
                send_error!(respond_to, e);
            }
        };
        debug!(user_id = id, "Committing edit");

        let directory = self.directory.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = directory.update_user(id, draft.clone()).await;
            let _ = completion_tx.send(Completion::UpdateFinished {
                id,
                draft,
                result,
                respond_to,
            });
        });
    }

    #[instrument(skip(self, draft, result, respond_to))]
    fn handle_update_finished(
        &mut self,
        id: UserId,
        draft: UserDraft,
        result: Result<(), DirectoryError>,
        respond_to: ControllerResponse<()>,
    ) {
        self.state.finish_commit(id, &draft, result.is_ok());
        match result {
            Ok(()) => {
                info!("User updated");
                self.notify(Notification::success(MSG_UPDATED));
                let _ = respond_to.send(Ok(()));
            }
            Err(e) => {
                error!(error = %e, "User update failed");
                self.notify(Notification::error(MSG_UPDATE_FAILED));
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    #[instrument(skip(self, respond_to))]
    fn handle_delete_user(&mut self, id: UserId, respond_to: ControllerResponse<()>) {
        let directory = self.directory.clone();
        let completion_tx = self.completion_tx.clone();
        tokio::spawn(async move {
            let result = directory.delete_user(id).await;
            let _ = completion_tx.send(Completion::DeleteFinished {
                id,
                result,
                respond_to,
            });
        });
    }

    #[instrument(skip(self, result, respond_to))]
    fn handle_delete_finished(
        &mut self,
        id: UserId,
        result: Result<(), DirectoryError>,
        respond_to: ControllerResponse<()>,
    ) {
        match result {
            Ok(()) => {
                let removed = self.state.remove_user(id);
                info!(removed, "User deleted");
                self.notify(Notification::success(MSG_DELETED));
                let _ = respond_to.send(Ok(()));
            }
            Err(e) => {
                error!(error = %e, "User delete failed");
                self.notify(Notification::error(MSG_DELETE_FAILED));
                let _ = respond_to.send(Err(e.into()));
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("No notification subscribers");
        }
    }
}
