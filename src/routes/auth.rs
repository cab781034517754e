use crate::{
    auth::{
        hash_password, verify_dummy_password, verify_password, AuthResponse, Identity,
        LoginRequest, RegisterRequest, SessionCookieConfig, TokenService,
    },
    error::AppError,
    repository::Repository,
};
use actix_web::{post, web, HttpResponse, Responder};
use serde_json::json;
use validator::Validate;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Register a new user
///
/// Creates the account, then answers `201` with a session token in the body and
/// in the session cookie. A taken username is `409`.
#[post("/register")]
pub async fn register(
    repo: web::Data<dyn Repository>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<SessionCookieConfig>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let password_hash = hash_password(&register_data.password).await?;
    let user = repo
        .create_user(&register_data.username, &password_hash)
        .await?;

    log::info!("Registered user {} ({})", user.id, user.username);

    let token = tokens.issue(&Identity {
        id: user.id,
        username: user.username,
    })?;

    Ok(HttpResponse::Created()
        .cookie(cookies.session(&token))
        .json(AuthResponse { token }))
}

/// Login user
///
/// Unknown usernames and wrong passwords get the same `400` answer, and both
/// pay for one bcrypt verification.
#[post("/login")]
pub async fn login(
    repo: web::Data<dyn Repository>,
    tokens: web::Data<TokenService>,
    cookies: web::Data<SessionCookieConfig>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = match repo.find_user_by_username(&login_data.username).await? {
        Some(user) => user,
        None => {
            verify_dummy_password(&login_data.password).await?;
            return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
        }
    };

    if !verify_password(&login_data.password, &user.password_hash).await? {
        log::info!("Failed login for user {}", user.id);
        return Err(AppError::BadRequest(INVALID_CREDENTIALS.into()));
    }

    let token = tokens.issue(&Identity {
        id: user.id,
        username: user.username,
    })?;

    Ok(HttpResponse::Ok()
        .cookie(cookies.session(&token))
        .json(AuthResponse { token }))
}

/// Logout
///
/// Clears the session cookie. The token itself stays valid until it expires.
#[post("/logout")]
pub async fn logout(cookies: web::Data<SessionCookieConfig>) -> impl Responder {
    HttpResponse::Ok()
        .cookie(cookies.removal())
        .json(json!({ "message": "Logged out" }))
}
