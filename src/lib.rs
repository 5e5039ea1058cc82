//! Pressroom - in-memory publishing backend
//!
//! Users, posts, bearer sessions and per-user preferences, fronted by a
//! pluggable rate limiter (fixed window or token bucket) chosen at startup.
//!
//! Layout follows ports and adapters:
//! - `domain` - entities and value objects
//! - `ports` - traits the application depends on
//! - `adapters` - in-memory stores, clocks and limiters
//! - `application` - command and query handlers
//! - `app` - wiring

pub mod adapters;
pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

pub use app::{App, AppError};
