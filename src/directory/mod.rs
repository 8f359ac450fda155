//! Handle to the remote user directory.
//!
//! [`DirectoryService`] owns the HTTP backend and serves [`DirectoryRequest`]s
//! from a mailbox; [`DirectoryClient`] is the cloneable handle the rest of the
//! crate talks to.

mod client;
mod http;
mod messages;
mod service;

pub use client::*;
pub use http::*;
pub use messages::*;
pub use service::*;
