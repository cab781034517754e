//! Persistence for users, boards, columns and tasks.
//!
//! Handlers talk to the [`Repository`] trait only. [`PgRepository`] is the PostgreSQL
//! implementation used in production; [`InMemoryRepository`] keeps the same
//! constraints (unique usernames, existing parents) in process memory.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Board, BoardWithColumns, Column, NewBoard, NewColumn, NewTask, Task, User, UserSummary,
};

pub use memory::InMemoryRepository;
pub use postgres::PgRepository;

pub const MISSING_BOARD: &str = "Referenced board does not exist";
pub const MISSING_COLUMN: &str = "Referenced column does not exist";
pub const MISSING_USER: &str = "Referenced user does not exist";

/// Errors surfaced by a [`Repository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint was violated.
    #[error("{0}")]
    Conflict(String),

    /// A referenced board, column or user does not exist.
    #[error("{0}")]
    MissingParent(String),

    /// Any other store fault. The message is for server logs only.
    #[error("Database error: {0}")]
    Database(String),
}

/// Every operation is a single independent statement; nothing spans calls.
#[async_trait]
pub trait Repository: Send + Sync {
    /// Fails with [`RepositoryError::Conflict`] if the username is taken.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserSummary, RepositoryError>;

    async fn find_user_by_username(&self, username: &str)
        -> Result<Option<User>, RepositoryError>;

    async fn list_users(&self) -> Result<Vec<UserSummary>, RepositoryError>;

    /// Boards ascending by id, each with its columns ordered by position then id.
    async fn list_boards_with_columns(&self) -> Result<Vec<BoardWithColumns>, RepositoryError>;

    async fn create_board(&self, board: NewBoard) -> Result<Board, RepositoryError>;

    async fn list_columns(&self, board_id: i32) -> Result<Vec<Column>, RepositoryError>;

    async fn create_column(&self, column: NewColumn) -> Result<Column, RepositoryError>;

    async fn list_tasks(&self, column_id: i32) -> Result<Vec<Task>, RepositoryError>;

    /// `user_id` must come from the verified session.
    async fn create_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError>;
}
