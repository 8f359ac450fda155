//! List state owned by the controller.
//!
//! The current page is the only stored list. The visible list is derived from
//! it and the active query every time it is read, so edits and deletes touch
//! exactly one collection.

use serde::Serialize;

use crate::domain::{User, UserDraft, UserId, UserPage};
use crate::error::ControllerError;

/// Result of a page request as seen by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response replaced the list.
    Applied,
    /// A newer request was issued before this one resolved; response dropped.
    Stale,
    /// The directory failed; the previous list is still shown.
    Failed,
    /// The page did not change, nothing was requested.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditPhase {
    Open,
    Committing,
}

/// The single in-progress edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditSession {
    pub user_id: UserId,
    pub draft: UserDraft,
    pub phase: EditPhase,
}

/// A page request in flight, tagged with its sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListState {
    users: Vec<User>,
    query: String,
    current_page: u32,
    total_pages: u32,
    edit: Option<EditSession>,
    latest_fetch: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    pub fn new() -> Self {
        Self {
            users: Vec::new(),
            query: String::new(),
            current_page: 1,
            total_pages: 1,
            edit: None,
            latest_fetch: 0,
        }
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn edit(&self) -> Option<&EditSession> {
        self.edit.as_ref()
    }

    /// Records of the current page matching the active query, in page order.
    pub fn visible(&self) -> Vec<&User> {
        self.users.iter().filter(|u| u.matches(&self.query)).collect()
    }

    pub fn apply_search(&mut self, query: &str) {
        self.query = query.to_lowercase();
    }

    /// Moves to `page` and issues a new sequence number for its request.
    pub fn begin_fetch(&mut self, page: u32) -> FetchTicket {
        self.latest_fetch += 1;
        self.current_page = page.max(1);
        FetchTicket {
            seq: self.latest_fetch,
            page: self.current_page,
        }
    }

    pub fn is_latest(&self, seq: u64) -> bool {
        seq == self.latest_fetch
    }

    /// Replaces the list with `page` unless a newer request has been issued.
    ///
    /// A fresh page clears the search query.
    pub fn apply_page(&mut self, seq: u64, page: UserPage) -> bool {
        if !self.is_latest(seq) {
            return false;
        }
        self.users = page.data;
        self.query.clear();
        self.total_pages = page.total_pages.max(1);
        true
    }

    /// Page reached by moving `delta` pages, clamped to `[1, total_pages]`.
    pub fn page_target(&self, delta: i64) -> u32 {
        let target = i64::from(self.current_page).saturating_add(delta);
        target.clamp(1, i64::from(self.total_pages)) as u32
    }

    /// Opens a draft seeded from the current record, replacing any open one.
    ///
    /// Refused while a commit is in flight: the committing draft is the one a
    /// failed request reopens.
    pub fn begin_edit(&mut self, id: UserId) -> Result<&UserDraft, ControllerError> {
        if let Some(session) = &self.edit {
            if session.phase == EditPhase::Committing {
                return Err(ControllerError::CommitInProgress(session.user_id));
            }
        }
        let user = self
            .users
            .iter()
            .find(|u| u.id == id)
            .ok_or(ControllerError::UserNotFound(id))?;
        let session = self.edit.insert(EditSession {
            user_id: id,
            draft: UserDraft::from(user),
            phase: EditPhase::Open,
        });
        Ok(&session.draft)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    /// Validates `draft`, stores it as the open draft and marks it committing.
    pub fn start_commit(&mut self, draft: UserDraft) -> Result<UserId, ControllerError> {
        let session = self.edit.as_mut().ok_or(ControllerError::NoEditInProgress)?;
        if session.phase == EditPhase::Committing {
            return Err(ControllerError::CommitInProgress(session.user_id));
        }
        draft.validate().map_err(ControllerError::InvalidDraft)?;
        session.draft = draft;
        session.phase = EditPhase::Committing;
        Ok(session.user_id)
    }

    /// Settles a commit for `id`.
    ///
    /// On success the draft is merged into the record and the edit closed; on
    /// failure the draft reopens. A cancelled edit stays cancelled.
    pub fn finish_commit(&mut self, id: UserId, draft: &UserDraft, succeeded: bool) {
        if succeeded {
            if let Some(user) = self.users.iter_mut().find(|u| u.id == id) {
                user.merge(draft);
            }
        }
        let Some(session) = self.edit.as_mut() else {
            return;
        };
        if session.user_id != id || session.phase != EditPhase::Committing {
            return;
        }
        if succeeded {
            self.edit = None;
        } else {
            session.phase = EditPhase::Open;
        }
    }

    /// Drops the record from the page. Returns whether it was present.
    pub fn remove_user(&mut self, id: UserId) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        if matches!(&self.edit, Some(s) if s.user_id == id && s.phase == EditPhase::Open) {
            self.edit = None;
        }
        self.users.len() != before
    }

    pub fn view(&self) -> ListView {
        ListView {
            users: self.visible().into_iter().cloned().collect(),
            page_size: self.users.len(),
            query: self.query.clone(),
            current_page: self.current_page,
            total_pages: self.total_pages,
            edit: self.edit.clone(),
        }
    }
}

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub users: Vec<User>,
    pub page_size: usize,
    pub query: String,
    pub current_page: u32,
    pub total_pages: u32,
    pub edit: Option<EditSession>,
}

impl ListView {
    /// True when nothing matches, the "No users found." state.
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
