//! User list & edit controller.
//!
//! [`UserListService`] owns the [`ListState`] of one view and processes one
//! message at a time; directory calls run on background tasks and report back
//! through the service's completion queue. [`UserListClient`] is the handle
//! the presentation layer drives.

mod client;
mod messages;
mod service;
mod state;

pub use client::*;
pub use messages::*;
pub use service::*;
pub use state::*;
