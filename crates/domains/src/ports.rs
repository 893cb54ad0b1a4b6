//! # Core Traits (Ports)
//!
//! Any storage adapter must implement these traits to be used by the services.
//! Each write method is one atomic unit against the store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Board, BoardChange, Tag, User};

/// Persistence contract for users.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Loads a user together with the ids of the boards it authored.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Inserts a new user. A taken name surfaces as `Conflict`.
    async fn save(&self, user: &User) -> Result<()>;

    /// Deletes a user and, by cascade, every board it authored.
    /// Returns `false` when no such user existed.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Lookup contract for tags. Tags are written by `BoardRepository`.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    async fn find_by_key_and_value(&self, key: &str, value: &str) -> Result<Option<Tag>>;
}

/// Persistence contract for the board aggregate.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Loads a board with its writer, tags and comments.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Board>>;

    /// Inserts a new board with its tags and comments in one transaction,
    /// inserting any tag that is not stored yet.
    async fn insert(&self, board: &Board) -> Result<()>;

    /// Applies one change to a stored board and returns the board as
    /// committed, or `None` when it does not exist.
    ///
    /// The board is locked for writing, read, changed and written back in a
    /// single transaction, and only the rows the change touches are written.
    async fn apply(&self, id: Uuid, change: &BoardChange) -> Result<Option<Board>>;
}
