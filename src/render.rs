//! Plain-text presentation of the controller's state.

use std::fmt::Write as _;

use crate::controller::{EditPhase, ListView};
use crate::domain::{Notification, Severity};

pub const NO_USERS: &str = "No users found.";

/// Draws the visible list, the open edit (if any) and the pager.
pub fn render_view(view: &ListView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Users List");
    if !view.query.is_empty() {
        let _ = writeln!(out, "Search: {}", view.query);
    }

    if view.is_empty() {
        let _ = writeln!(out, "{NO_USERS}");
    } else {
        for user in &view.users {
            let _ = writeln!(out, "[{:>3}] {:<24} {}", user.id, user.full_name(), user.email);
        }
    }

    if let Some(edit) = &view.edit {
        let status = match edit.phase {
            EditPhase::Open => "editing",
            EditPhase::Committing => "saving",
        };
        let _ = writeln!(
            out,
            "Edit user {} ({status}): first={} last={} email={}",
            edit.user_id, edit.draft.first_name, edit.draft.last_name, edit.draft.email
        );
    }

    let prev = if view.has_previous() { "<prev" } else { "     " };
    let next = if view.has_next() { "next>" } else { "     " };
    let _ = writeln!(
        out,
        "{prev}  Page {} of {}  {next}",
        view.current_page, view.total_pages
    );
    out
}

pub fn render_notification(notification: &Notification) -> String {
    match notification.severity {
        Severity::Success => format!("[ok] {}", notification.message),
        Severity::Error => format!("[error] {}", notification.message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    fn view(users: Vec<User>) -> ListView {
        ListView {
            page_size: users.len(),
            users,
            query: String::new(),
            current_page: 1,
            total_pages: 2,
            edit: None,
        }
    }

    #[test]
    fn renders_users_and_pager() {
        let out = render_view(&view(vec![User::new(7, "George", "Edwards", "george.edwards@reqres.in")]));
        assert!(out.contains("George Edwards"));
        assert!(out.contains("george.edwards@reqres.in"));
        assert!(out.contains("Page 1 of 2"));
        assert!(out.contains("next>"));
        assert!(!out.contains("<prev"));
        assert!(!out.contains(NO_USERS));
    }

    #[test]
    fn renders_empty_state() {
        let mut empty = view(Vec::new());
        empty.query = "geo".into();
        let out = render_view(&empty);
        assert!(out.contains(NO_USERS));
        assert!(out.contains("Search: geo"));
    }

    #[test]
    fn renders_notifications() {
        assert_eq!(render_notification(&Notification::success("Saved")), "[ok] Saved");
        assert_eq!(render_notification(&Notification::error("Nope")), "[error] Nope");
    }
}
