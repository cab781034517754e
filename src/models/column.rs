use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A column of a board. Columns are displayed in ascending `position` order;
/// positions are not unique within a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Column {
    pub id: i32,
    pub board_id: i32,
    pub column_name: String,
    pub position: i32,
}

/// Payload for creating a column.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewColumn {
    pub board_id: i32,
    #[validate(length(min = 1, max = 100))]
    pub column_name: String,
    #[validate(range(min = 0))]
    pub position: i32,
}
