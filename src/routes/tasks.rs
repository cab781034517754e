use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::NewTask,
    repository::Repository,
};
use actix_web::{get, post, web, HttpResponse, Responder};
use validator::Validate;

/// Lists the tasks of one column, oldest first. Unknown columns give `[]`.
#[get("/tasks/{column_id}")]
pub async fn list_tasks(
    repo: web::Data<dyn Repository>,
    column_id: web::Path<i32>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = repo.list_tasks(column_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a new task for the authenticated user.
///
/// The task's `user_id` is always the caller's id from the session token; a
/// `user_id` field in the body is ignored.
///
/// ## Request Body:
/// - `column_id`: column the task belongs to (required).
/// - `title`: 1 to 200 characters (required).
/// - `description` (optional): up to 1000 characters.
/// - `priority` (optional): `low`, `medium`, `high` or `urgent`.
/// - `due_date` (optional): `YYYY-MM-DD`.
///
/// ## Responses:
/// - `201 Created`: the new task.
/// - `400 Bad Request`: invalid payload or unknown `column_id`.
/// - `401 Unauthorized` / `403 Forbidden`: missing or invalid token.
#[post("/tasks")]
pub async fn create_task(
    repo: web::Data<dyn Repository>,
    user: AuthenticatedUser,
    task_data: web::Json<NewTask>,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = repo.create_task(user.0.id, task_data.into_inner()).await?;
    log::info!(
        "User {} created task {} in column {}",
        user.0.id,
        task.id,
        task.column_id
    );

    Ok(HttpResponse::Created().json(task))
}

