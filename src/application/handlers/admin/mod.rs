//! Operator handlers.
//!
//! Callers are expected to have checked the operator's role already.

mod bulk_update_roles;
mod reset_rate_limit;
mod reset_user_password;

pub use bulk_update_roles::{BulkUpdateRolesCommand, BulkUpdateRolesHandler};
pub use reset_rate_limit::{ResetRateLimitCommand, ResetRateLimitHandler};
pub use reset_user_password::{ResetUserPasswordCommand, ResetUserPasswordHandler};
