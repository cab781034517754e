use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{NewBoard, NewColumn},
    repository::Repository,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Lists every board with its columns.
///
/// ## Responses:
/// - `200 OK`: JSON array of `{id, name, columns}`; `columns` is `[]` for a board
///   without columns and is ordered by `position`.
#[get("/boards")]
pub async fn list_boards(
    repo: web::Data<dyn Repository>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let boards = repo.list_boards_with_columns().await?;
    Ok(HttpResponse::Ok().json(boards))
}

#[post("/boards")]
pub async fn create_board(
    repo: web::Data<dyn Repository>,
    user: AuthenticatedUser,
    board_data: web::Json<NewBoard>,
) -> Result<impl Responder, AppError> {
    board_data.validate()?;

    let board = repo.create_board(board_data.into_inner()).await?;
    log::info!("User {} created board {}", user.0.id, board.id);

    Ok(HttpResponse::Created().json(board))
}

/// Lists the columns of one board, ordered by `position`. Unknown boards give `[]`.
#[get("/columns/{board_id}")]
pub async fn list_columns(
    repo: web::Data<dyn Repository>,
    board_id: web::Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let columns = repo.list_columns(board_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(columns))
}

/// Creates a column.
///
/// ## Responses:
/// - `201 Created`: the new column.
/// - `400 Bad Request`: invalid payload, negative `position`, or unknown `board_id`.
#[post("/columns")]
pub async fn create_column(
    repo: web::Data<dyn Repository>,
    user: AuthenticatedUser,
    column_data: web::Json<NewColumn>,
) -> Result<impl Responder, AppError> {
    column_data.validate()?;

    let column = repo.create_column(column_data.into_inner()).await?;
    log::info!(
        "User {} created column {} on board {}",
        user.0.id,
        column.id,
        column.board_id
    );

    Ok(HttpResponse::Created().json(column))
}
