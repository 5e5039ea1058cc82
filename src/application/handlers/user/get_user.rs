//! GetUserHandler - Query handler for a single user.

use std::sync::Arc;

use crate::application::views::UserView;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::UserRepository;

/// Query to get a user by ID.
#[derive(Debug, Clone, Copy)]
pub struct GetUserQuery {
    pub user_id: UserId,
}

/// Handler for retrieving users.
pub struct GetUserHandler {
    users: Arc<dyn UserRepository>,
}

impl GetUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, query: GetUserQuery) -> Result<UserView, DomainError> {
        let user = self
            .users
            .find_by_id(query.user_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::UserNotFound, format!("User {}", query.user_id))
            })?;

        Ok(UserView::from(&user))
    }
}
