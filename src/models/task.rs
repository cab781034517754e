use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the priority of a task.
/// Corresponds to the `task_priority` SQL enum.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// Payload for creating a task.
///
/// Has no creator field: the owner is always the authenticated
/// user, and a `user_id` key in the request body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewTask {
    pub column_id: i32,

    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// At most 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub priority: Option<TaskPriority>,

    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub due_date: Option<NaiveDate>,
}

/// Represents a task as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: i32,
    /// The user who created the task.
    pub user_id: i32,
    pub column_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Builds a task from its payload, owned by `user_id`.
    pub fn new(id: i32, user_id: i32, input: NewTask) -> Self {
        Self {
            id,
            user_id,
            column_id: input.column_id,
            title: input.title,
            description: input.description,
            priority: input.priority,
            due_date: input.due_date,
        }
    }
}
