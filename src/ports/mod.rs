//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `UserRepository` - User accounts
//! - `PostRepository` - Blog posts
//! - `SessionStore` - Authentication sessions
//! - `PreferencesRepository` - Per-user settings
//!
//! ## Infrastructure Ports
//!
//! - `RateLimiter` - Per-caller admission control
//! - `Clock` - Current time

mod clock;
mod post_repository;
mod preferences_repository;
mod rate_limiter;
mod session_store;
mod user_repository;

pub use clock::Clock;
pub use post_repository::{PostFilter, PostRepository};
pub use preferences_repository::PreferencesRepository;
pub use rate_limiter::{AdmissionDecision, CallerId, RateLimitError, RateLimitStrategy, RateLimiter};
pub use session_store::SessionStore;
pub use user_repository::{UserFilter, UserRepository};
