pub mod board;
pub mod column;
pub mod task;
pub mod user;

pub use board::{group_board_rows, Board, BoardColumnRow, BoardWithColumns, NewBoard};
pub use column::{Column, NewColumn};
pub use task::{NewTask, Task, TaskPriority};
pub use user::{User, UserSummary};
