use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::Column;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Board {
    pub id: i32,
    pub name: String,
}

/// Payload for creating a board.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewBoard {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

/// A board together with its columns, serialized as `{id, name, columns: [...]}`.
///
/// `columns` is always present; a board without columns yields an empty array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardWithColumns {
    #[serde(flatten)]
    pub board: Board,
    pub columns: Vec<Column>,
}

/// One row of the `boards LEFT JOIN board_columns` read. Column fields are `None`
/// for boards that have no columns.
#[derive(Debug, Clone, FromRow)]
pub struct BoardColumnRow {
    pub board_id: i32,
    pub board_name: String,
    pub column_id: Option<i32>,
    pub column_name: Option<String>,
    pub position: Option<i32>,
}

/// Folds joined rows into one entry per board.
///
/// Rows must arrive grouped by board (the query orders by board id, then position),
/// and the output keeps that order.
pub fn group_board_rows(rows: Vec<BoardColumnRow>) -> Vec<BoardWithColumns> {
    let mut boards: Vec<BoardWithColumns> = Vec::new();

    for row in rows {
        if boards.last().map(|b| b.board.id) != Some(row.board_id) {
            boards.push(BoardWithColumns {
                board: Board {
                    id: row.board_id,
                    name: row.board_name,
                },
                columns: Vec::new(),
            });
        }

        if let (Some(id), Some(column_name), Some(position), Some(current)) = (
            row.column_id,
            row.column_name,
            row.position,
            boards.last_mut(),
        ) {
            current.columns.push(Column {
                id,
                board_id: row.board_id,
                column_name,
                position,
            });
        }
    }

    boards
}
