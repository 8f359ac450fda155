//! System orchestration, startup, and shutdown logic.

pub mod directory_system;
pub mod tracing;

pub use directory_system::*;
pub use self::tracing::*;
