pub mod user;
pub mod notification;
pub mod session;

pub use user::*;
pub use notification::*;
pub use session::*;
