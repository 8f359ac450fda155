//! Terminal client for a remote, paginated user directory.
//!
//! - [`directory`]: the REST directory behind a mailbox actor.
//! - [`controller`]: list, search, pagination and edit state of one view.
//! - [`session`]: login token storage and the session guard.
//! - [`app_system`]: startup, shutdown and tracing setup.

#[macro_use]
mod macros;

pub mod app_system;
pub mod args;
pub mod config;
pub mod console;
pub mod controller;
pub mod directory;
pub mod domain;
pub mod error;
pub mod render;
pub mod session;

#[cfg(test)]
mod mock_framework;
