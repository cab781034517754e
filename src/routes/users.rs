use crate::{auth::AuthenticatedUser, auth::AuthMiddleware, error::AppError, repository::Repository};
use actix_web::{get, web, HttpResponse, Responder};
use serde_json::json;

/// Echoes the identity carried by the caller's session token.
#[get("/protected", wrap = "AuthMiddleware")]
pub async fn protected(user: AuthenticatedUser) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "You are authenticated",
        "user": user.0
    }))
}

/// Lists every user as `{id, username}`.
#[get("/users", wrap = "AuthMiddleware")]
pub async fn list_users(
    repo: web::Data<dyn Repository>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let users = repo.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}
