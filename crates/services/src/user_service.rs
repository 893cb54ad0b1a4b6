//! User orchestration: create and delete.

use std::sync::Arc;

use domains::errors::{DomainError, Result};
use domains::models::User;
use domains::ports::UserRepository;
use uuid::Uuid;

use crate::commands::CreateUser;

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// A duplicate name is rejected by the store and surfaces as `Conflict`.
    #[tracing::instrument(skip(self, command))]
    pub async fn create_user(&self, command: CreateUser) -> Result<User> {
        let user = User::new(command.name);
        self.users.save(&user).await?;
        tracing::info!(user_id = %user.id(), "user created");
        Ok(user)
    }

    /// Deletes the user and every board it authored.
    ///
    /// Comments this user left on other users' boards are kept and still
    /// point at the deleted id.
    #[tracing::instrument(skip(self))]
    pub async fn delete_user(&self, id: Uuid) -> Result<()> {
        if !self.users.delete(id).await? {
            return Err(DomainError::not_found("User", id));
        }
        tracing::info!("user deleted");
        Ok(())
    }
}
