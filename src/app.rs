//! Application setup and wiring
//!
//! `App` owns the in-memory stores, the configured rate limiter and the
//! optional eviction sweeper, and hands out handlers bound to them.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::adapters::{
    EvictionSweeper, InMemoryPostRepository, InMemoryPreferencesRepository, InMemorySessionStore,
    InMemoryUserRepository, RateLimiterStrategy, SystemClock,
};
use crate::application::handlers::{
    BulkUpdateRolesHandler, CheckRateLimitHandler, CreatePostHandler, CreateSessionHandler,
    CreateUserHandler, DeleteUserHandler, GetPostHandler, GetPreferencesHandler, GetUserHandler,
    ListPostsHandler, ListUsersHandler, LogoutHandler, PublishPostHandler,
    ResetPreferencesHandler, ResetRateLimitHandler, ResetUserPasswordHandler,
    UpdatePreferencesHandler, UpdateUserHandler, ValidateSessionHandler,
};
use crate::config::{AppConfig, ValidationError};
use crate::ports::{
    Clock, PostRepository, PreferencesRepository, RateLimitError, RateLimiter, SessionStore,
    UserRepository,
};

/// Errors raised while assembling the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ValidationError),

    #[error(transparent)]
    RateLimit(#[from] RateLimitError),

    #[error("background eviction requires a running tokio runtime")]
    NoRuntime,
}

/// Background sweeper task and the channel that stops it.
struct SweeperHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

/// The assembled application.
pub struct App {
    clock: Arc<dyn Clock>,
    limiter: Arc<RateLimiterStrategy>,
    users: Arc<dyn UserRepository>,
    posts: Arc<dyn PostRepository>,
    sessions: Arc<dyn SessionStore>,
    preferences: Arc<dyn PreferencesRepository>,
    session_ttl_ms: u64,
    sweeper: Option<SweeperHandle>,
}

impl App {
    /// Builds the application against the system clock.
    pub fn build(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Builds the application against the given clock.
    ///
    /// Spawns the eviction sweeper when the config asks for background
    /// eviction, which requires a tokio runtime.
    pub fn with_clock(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        config.validate()?;

        let limiter = Arc::new(RateLimiterStrategy::from_config(
            &config.rate_limit,
            clock.clone(),
        )?);

        let sweeper = if config.rate_limit.needs_sweeper() {
            let runtime = tokio::runtime::Handle::try_current().map_err(|_| AppError::NoRuntime)?;
            let (shutdown, rx) = watch::channel(false);
            let sweeper = EvictionSweeper::new(limiter.clone(), config.rate_limit.sweep_interval());
            let task = runtime.spawn(async move { sweeper.run(rx).await });
            tracing::info!(
                interval_ms = config.rate_limit.sweep_interval_ms,
                "eviction sweeper started"
            );
            Some(SweeperHandle { shutdown, task })
        } else {
            None
        };

        Ok(Self {
            clock,
            limiter,
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            sessions: Arc::new(InMemorySessionStore::new()),
            preferences: Arc::new(InMemoryPreferencesRepository::new()),
            session_ttl_ms: config.auth.session_ttl_ms,
            sweeper,
        })
    }

    /// The configured limiter behind the port.
    pub fn rate_limiter(&self) -> Arc<dyn RateLimiter> {
        self.limiter.clone()
    }

    /// The configured limiter as its concrete strategy.
    pub fn rate_limiter_strategy(&self) -> &RateLimiterStrategy {
        &self.limiter
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Stops the sweeper (running one final sweep) and waits for it.
    pub async fn shutdown(self) {
        if let Some(sweeper) = self.sweeper {
            // A send error means the task is already gone.
            let _ = sweeper.shutdown.send(true);
            if let Err(err) = sweeper.task.await {
                tracing::error!(error = %err, "eviction sweeper panicked");
            }
        }
        tracing::info!("application shut down");
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Users
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_user(&self) -> CreateUserHandler {
        CreateUserHandler::new(self.users.clone(), self.clock.clone())
    }

    pub fn get_user(&self) -> GetUserHandler {
        GetUserHandler::new(self.users.clone())
    }

    pub fn update_user(&self) -> UpdateUserHandler {
        UpdateUserHandler::new(self.users.clone(), self.clock.clone())
    }

    pub fn delete_user(&self) -> DeleteUserHandler {
        DeleteUserHandler::new(
            self.users.clone(),
            self.sessions.clone(),
            self.preferences.clone(),
        )
    }

    pub fn list_users(&self) -> ListUsersHandler {
        ListUsersHandler::new(self.users.clone(), self.preferences.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Posts
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_post(&self) -> CreatePostHandler {
        CreatePostHandler::new(self.posts.clone(), self.clock.clone())
    }

    pub fn get_post(&self) -> GetPostHandler {
        GetPostHandler::new(self.posts.clone())
    }

    pub fn publish_post(&self) -> PublishPostHandler {
        PublishPostHandler::new(self.posts.clone(), self.clock.clone())
    }

    pub fn list_posts(&self) -> ListPostsHandler {
        ListPostsHandler::new(self.posts.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Auth
    // ─────────────────────────────────────────────────────────────────────────

    pub fn create_session(&self) -> CreateSessionHandler {
        CreateSessionHandler::new(
            self.users.clone(),
            self.sessions.clone(),
            self.clock.clone(),
            self.session_ttl_ms,
        )
    }

    pub fn validate_session(&self) -> ValidateSessionHandler {
        ValidateSessionHandler::new(self.sessions.clone(), self.clock.clone())
    }

    pub fn logout(&self) -> LogoutHandler {
        LogoutHandler::new(self.sessions.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Preferences
    // ─────────────────────────────────────────────────────────────────────────

    pub fn get_preferences(&self) -> GetPreferencesHandler {
        GetPreferencesHandler::new(self.users.clone(), self.preferences.clone())
    }

    pub fn update_preferences(&self) -> UpdatePreferencesHandler {
        UpdatePreferencesHandler::new(
            self.users.clone(),
            self.preferences.clone(),
            self.clock.clone(),
        )
    }

    pub fn reset_preferences(&self) -> ResetPreferencesHandler {
        ResetPreferencesHandler::new(self.users.clone(), self.preferences.clone())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Admin and rate limiting
    // ─────────────────────────────────────────────────────────────────────────

    pub fn reset_user_password(&self) -> ResetUserPasswordHandler {
        ResetUserPasswordHandler::new(
            self.users.clone(),
            self.sessions.clone(),
            self.clock.clone(),
        )
    }

    pub fn bulk_update_roles(&self) -> BulkUpdateRolesHandler {
        BulkUpdateRolesHandler::new(self.users.clone(), self.clock.clone())
    }

    pub fn reset_rate_limit(&self) -> ResetRateLimitHandler {
        ResetRateLimitHandler::new(self.rate_limiter())
    }

    pub fn check_rate_limit(&self) -> CheckRateLimitHandler {
        CheckRateLimitHandler::new(self.rate_limiter(), self.clock.clone())
    }
}
