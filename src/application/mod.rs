//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate state; query handlers only read it.

pub mod handlers;
pub mod views;

pub use handlers::*;
pub use views::{ErrorView, PreferencesView, UserView, PREFERENCES_VERSION};
