//! Authentication session handlers.

mod create_session;
mod logout;
mod validate_session;

pub use create_session::{CreateSessionCommand, CreateSessionHandler};
pub use logout::{LogoutCommand, LogoutHandler};
pub use validate_session::{ValidateSessionHandler, ValidateSessionQuery};
