//! Session module - bearer-token authentication sessions.

mod aggregate;

pub use aggregate::{Session, SessionInfo, DEFAULT_SESSION_TTL_MS};
