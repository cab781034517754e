use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{Repository, RepositoryError, MISSING_BOARD, MISSING_COLUMN, MISSING_USER};
use crate::models::{
    Board, BoardWithColumns, Column, NewBoard, NewColumn, NewTask, Task, User, UserSummary,
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    boards: Vec<Board>,
    columns: Vec<Column>,
    tasks: Vec<Task>,
}

/// Process-local repository with the same constraints as the SQL schema.
///
/// Rows are never deleted, so ids are assigned as `len + 1`.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: RwLock<Tables>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn next_id(len: usize) -> Result<i32, RepositoryError> {
    i32::try_from(len + 1).map_err(|_| RepositoryError::Database("id space exhausted".into()))
}

fn sorted_columns(columns: &[Column], board_id: i32) -> Vec<Column> {
    let mut columns: Vec<Column> = columns
        .iter()
        .filter(|c| c.board_id == board_id)
        .cloned()
        .collect();
    columns.sort_by_key(|c| (c.position, c.id));
    columns
}

#[async_trait]
impl Repository for InMemoryRepository {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserSummary, RepositoryError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.username == username) {
            return Err(RepositoryError::Conflict("Username already taken".into()));
        }

        let user = User {
            id: next_id(tables.users.len())?,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        let summary = UserSummary::from(&user);
        tables.users.push(user);

        Ok(summary)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().map(UserSummary::from).collect())
    }

    async fn list_boards_with_columns(&self) -> Result<Vec<BoardWithColumns>, RepositoryError> {
        let tables = self.tables.read().await;

        Ok(tables
            .boards
            .iter()
            .map(|board| BoardWithColumns {
                board: board.clone(),
                columns: sorted_columns(&tables.columns, board.id),
            })
            .collect())
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board, RepositoryError> {
        let mut tables = self.tables.write().await;

        let board = Board {
            id: next_id(tables.boards.len())?,
            name: board.name,
        };
        tables.boards.push(board.clone());

        Ok(board)
    }

    async fn list_columns(&self, board_id: i32) -> Result<Vec<Column>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(sorted_columns(&tables.columns, board_id))
    }

    async fn create_column(&self, column: NewColumn) -> Result<Column, RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.boards.iter().any(|b| b.id == column.board_id) {
            return Err(RepositoryError::MissingParent(MISSING_BOARD.into()));
        }

        let column = Column {
            id: next_id(tables.columns.len())?,
            board_id: column.board_id,
            column_name: column.column_name,
            position: column.position,
        };
        tables.columns.push(column.clone());

        Ok(column)
    }

    async fn list_tasks(&self, column_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .tasks
            .iter()
            .filter(|t| t.column_id == column_id)
            .cloned()
            .collect())
    }

    async fn create_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError> {
        let mut tables = self.tables.write().await;

        if !tables.columns.iter().any(|c| c.id == task.column_id) {
            return Err(RepositoryError::MissingParent(MISSING_COLUMN.into()));
        }
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(RepositoryError::MissingParent(MISSING_USER.into()));
        }

        let task = Task::new(next_id(tables.tasks.len())?, user_id, task);
        tables.tasks.push(task.clone());

        Ok(task)
    }
}
