//! CreateUserHandler - Command handler for registering user accounts.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::DomainError;
use crate::domain::user::{Email, Password, User};
use crate::ports::{Clock, UserRepository};

/// Command to register a new user.
#[derive(Debug, Clone)]
pub struct CreateUserCommand {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

/// Handler for creating users.
pub struct CreateUserHandler {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateUserHandler {
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    pub async fn handle(&self, cmd: CreateUserCommand) -> Result<UserView, DomainError> {
        // 1. Validate before an id is consumed
        let email = Email::parse(cmd.email)?;
        let password = Password::new(cmd.password)?;

        // 2. Register and persist
        let id = self.users.next_id().await?;
        let user = User::register(id, email, &password, cmd.name, self.clock.now());
        self.users.save(&user).await?;

        tracing::info!(user_id = %id, "user created");
        Ok(UserView::from(&user))
    }
}
