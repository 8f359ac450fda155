//! Line commands of the interactive browser.

use std::str::FromStr;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use crate::controller::{FetchOutcome, UserListClient};
use crate::domain::{Notification, UserDraft, UserId};
use crate::error::ControllerError;

pub const HELP: &str = "commands: search <text> | next | prev | page | refresh | edit <id> | \
set first|last|email <value> | save | cancel | delete <id> | help | quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    FirstName,
    LastName,
    Email,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Search(String),
    Next,
    Prev,
    Page,
    Refresh,
    Edit(UserId),
    Set(DraftField, String),
    Save,
    Cancel,
    Delete(UserId),
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let id = |rest: &str| {
            rest.parse::<UserId>()
                .map_err(|_| format!("expected a user id, got {rest:?}"))
        };

        match word {
            // A bare "search" clears the filter.
            "search" | "/" => Ok(Self::Search(rest.to_string())),
            "next" | "n" => Ok(Self::Next),
            "prev" | "p" => Ok(Self::Prev),
            "page" | "" => Ok(Self::Page),
            "refresh" | "r" => Ok(Self::Refresh),
            "edit" | "e" => id(rest).map(Self::Edit),
            "set" => {
                let (field, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "usage: set first|last|email <value>".to_string())?;
                let field = match field {
                    "first" => DraftField::FirstName,
                    "last" => DraftField::LastName,
                    "email" => DraftField::Email,
                    other => return Err(format!("unknown field {other:?}")),
                };
                Ok(Self::Set(field, value.trim().to_string()))
            }
            "save" => Ok(Self::Save),
            "cancel" => Ok(Self::Cancel),
            "delete" | "d" => id(rest).map(Self::Delete),
            "help" | "?" => Ok(Self::Help),
            "quit" | "q" | "exit" => Ok(Self::Quit),
            other => Err(format!("unknown command {other:?}")),
        }
    }
}

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Redraw,
    Help,
    Quit,
}

/// Drives a [`UserListClient`] from parsed commands.
///
/// Holds the working copy of the draft between `edit` and `save`, like the
/// form fields of an edit dialog.
pub struct Console {
    client: UserListClient,
    draft: Option<UserDraft>,
}

impl Console {
    pub fn new(client: UserListClient) -> Self {
        Self {
            client,
            draft: None,
        }
    }

    /// Starts relaying notifications to `emit`, then activates the view and
    /// opens `page`.
    ///
    /// The subscription exists before the first request, so a failed initial
    /// load still reaches `emit`.
    pub async fn open<F>(client: UserListClient, page: u32, emit: F) -> Result<Self, ControllerError>
    where
        F: FnMut(Notification) + Send + 'static,
    {
        tokio::spawn(relay_notifications(client.subscribe(), emit));

        if client.activate().await? == FetchOutcome::Failed {
            warn!("Initial page failed to load");
        }
        if page != 1 && client.fetch_page(page).await? == FetchOutcome::Failed {
            warn!(page, "Requested page failed to load");
        }
        Ok(Self::new(client))
    }

    pub fn client(&self) -> &UserListClient {
        &self.client
    }

    pub async fn execute(&mut self, command: ConsoleCommand) -> Result<Flow, ControllerError> {
        match command {
            ConsoleCommand::Search(query) => self.client.apply_search(query).await?,
            ConsoleCommand::Next => {
                self.client.set_page(1).await?;
            }
            ConsoleCommand::Prev => {
                self.client.set_page(-1).await?;
            }
            ConsoleCommand::Page => {}
            ConsoleCommand::Refresh => {
                let page = self.client.view().await?.current_page;
                if self.client.fetch_page(page).await? == FetchOutcome::Failed {
                    warn!(page, "Refresh failed, showing previous list");
                }
            }
            ConsoleCommand::Edit(id) => {
                self.draft = Some(self.client.begin_edit(id).await?);
            }
            ConsoleCommand::Set(field, value) => {
                let draft = self.draft.as_mut().ok_or(ControllerError::NoEditInProgress)?;
                match field {
                    DraftField::FirstName => draft.first_name = value,
                    DraftField::LastName => draft.last_name = value,
                    DraftField::Email => draft.email = value,
                }
            }
            ConsoleCommand::Save => {
                let draft = self.draft.clone().ok_or(ControllerError::NoEditInProgress)?;
                self.client.commit_edit(draft).await?;
                self.draft = None;
            }
            ConsoleCommand::Cancel => {
                self.client.cancel_edit().await?;
                self.draft = None;
            }
            ConsoleCommand::Delete(id) => self.client.delete_user(id).await?,
            ConsoleCommand::Help => return Ok(Flow::Help),
            ConsoleCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Redraw)
    }
}

/// Hands every notification to `emit` until the controller is gone.
///
/// A slow consumer loses the notifications it lagged behind on, not the
/// subscription.
pub async fn relay_notifications<F>(mut notifications: broadcast::Receiver<Notification>, mut emit: F)
where
    F: FnMut(Notification),
{
    loop {
        match notifications.recv().await {
            Ok(notification) => emit(notification),
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Notifications dropped"),
            Err(RecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relay_survives_lagging() {
        let (sender, receiver) = broadcast::channel(1);
        sender.send(Notification::success("first")).unwrap();
        sender.send(Notification::error("second")).unwrap();
        sender.send(Notification::success("third")).unwrap();
        drop(sender);

        let mut seen = Vec::new();
        relay_notifications(receiver, |n| seen.push(n)).await;
        assert_eq!(seen, vec![Notification::success("third")]);
    }

    #[test]
    fn parses_commands() {
        assert_eq!("search Geo Ed".parse(), Ok(ConsoleCommand::Search("Geo Ed".into())));
        assert_eq!("search".parse(), Ok(ConsoleCommand::Search(String::new())));
        assert_eq!(" next ".parse(), Ok(ConsoleCommand::Next));
        assert_eq!("edit 7".parse(), Ok(ConsoleCommand::Edit(7)));
        assert_eq!(
            "set email george@example.com".parse(),
            Ok(ConsoleCommand::Set(DraftField::Email, "george@example.com".into()))
        );
        assert_eq!("delete 3".parse(), Ok(ConsoleCommand::Delete(3)));
        assert_eq!("".parse(), Ok(ConsoleCommand::Page));
        assert_eq!("q".parse(), Ok(ConsoleCommand::Quit));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("edit seven".parse::<ConsoleCommand>().is_err());
        assert!("set nickname G".parse::<ConsoleCommand>().is_err());
        assert!("set first".parse::<ConsoleCommand>().is_err());
        assert!("launch".parse::<ConsoleCommand>().is_err());
    }
}
