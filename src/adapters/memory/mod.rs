//! In-memory store adapters.
//!
//! Process-local implementations of the storage ports. State lives for the
//! lifetime of the process; nothing is persisted.
//!
//! - `InMemoryUserRepository` - user accounts with sequential ids
//! - `InMemoryPostRepository` - posts with sequential ids
//! - `InMemorySessionStore` - bearer token to session map
//! - `InMemoryPreferencesRepository` - per-user preferences

mod post_repository;
mod preferences_repository;
mod session_store;
mod user_repository;

pub use post_repository::InMemoryPostRepository;
pub use preferences_repository::InMemoryPreferencesRepository;
pub use session_store::InMemorySessionStore;
pub use user_repository::InMemoryUserRepository;
