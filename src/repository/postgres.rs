use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use super::{Repository, RepositoryError, MISSING_BOARD, MISSING_COLUMN, MISSING_USER};
use crate::config::Config;
use crate::models::{
    group_board_rows, Board, BoardColumnRow, BoardWithColumns, Column, NewBoard, NewColumn,
    NewTask, Task, User, UserSummary,
};

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";

const TASK_COLUMNS: &str = "id, user_id, column_id, title, description, priority, due_date";

/// Opens the connection pool described by `config`.
pub async fn connect(config: &Config) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
}

/// Applies the migrations under `migrations/`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    log::info!("Running database migrations");
    sqlx::migrate!("./migrations").run(pool).await
}

/// Maps driver errors onto the repository taxonomy. Constraint names and SQL text
/// stay in the `Database` message, which is only ever logged.
impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        if let Some(db_error) = error.as_database_error() {
            match db_error.code().as_deref() {
                Some(UNIQUE_VIOLATION) => {
                    return RepositoryError::Conflict("Username already taken".into())
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    return RepositoryError::MissingParent(
                        missing_parent_message(db_error.constraint()).into(),
                    )
                }
                _ => {}
            }
        }
        RepositoryError::Database(error.to_string())
    }
}

/// Names the parent behind a violated foreign key, from Postgres' default
/// `<table>_<column>_fkey` constraint names.
fn missing_parent_message(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("tasks_user_id_fkey") => MISSING_USER,
        Some("tasks_column_id_fkey") => MISSING_COLUMN,
        _ => MISSING_BOARD,
    }
}

/// PostgreSQL-backed repository. Connections are taken from the pool per statement.
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository for PgRepository {
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<UserSummary, RepositoryError> {
        let user = sqlx::query_as::<_, UserSummary>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id, username",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, RepositoryError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let users = sqlx::query_as::<_, UserSummary>("SELECT id, username FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(users)
    }

    async fn list_boards_with_columns(&self) -> Result<Vec<BoardWithColumns>, RepositoryError> {
        let rows = sqlx::query_as::<_, BoardColumnRow>(
            "SELECT b.id AS board_id, b.name AS board_name, \
                    c.id AS column_id, c.column_name, c.position \
             FROM boards b \
             LEFT JOIN board_columns c ON c.board_id = b.id \
             ORDER BY b.id, c.position, c.id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(group_board_rows(rows))
    }

    async fn create_board(&self, board: NewBoard) -> Result<Board, RepositoryError> {
        let board =
            sqlx::query_as::<_, Board>("INSERT INTO boards (name) VALUES ($1) RETURNING id, name")
                .bind(board.name)
                .fetch_one(&self.pool)
                .await?;

        Ok(board)
    }

    async fn list_columns(&self, board_id: i32) -> Result<Vec<Column>, RepositoryError> {
        let columns = sqlx::query_as::<_, Column>(
            "SELECT id, board_id, column_name, position FROM board_columns \
             WHERE board_id = $1 ORDER BY position, id",
        )
        .bind(board_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(columns)
    }

    async fn create_column(&self, column: NewColumn) -> Result<Column, RepositoryError> {
        let column = sqlx::query_as::<_, Column>(
            "INSERT INTO board_columns (board_id, column_name, position) VALUES ($1, $2, $3) \
             RETURNING id, board_id, column_name, position",
        )
        .bind(column.board_id)
        .bind(column.column_name)
        .bind(column.position)
        .fetch_one(&self.pool)
        .await?;

        Ok(column)
    }

    async fn list_tasks(&self, column_id: i32) -> Result<Vec<Task>, RepositoryError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE column_id = $1 ORDER BY id",
            TASK_COLUMNS
        ))
        .bind(column_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn create_task(&self, user_id: i32, task: NewTask) -> Result<Task, RepositoryError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks (user_id, column_id, title, description, priority, due_date) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {}",
            TASK_COLUMNS
        ))
        .bind(user_id)
        .bind(task.column_id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.priority)
        .bind(task.due_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }
}
