//!
//! # Custom Error Handling
//!
//! This module defines the `AppError` type returned by every handler, middleware and
//! service in the application. `AppError` implements `actix_web::error::ResponseError`
//! so that each variant maps onto one HTTP status with a JSON body of the form
//! `{"error": "<message>"}`.
//!
//! Server-side failures (database and internal errors) are logged in full and answered
//! with a generic message; store details, SQL text and secrets never reach the client.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::repository::RepositoryError;

/// Message sent to clients for every 5xx response.
pub const GENERIC_SERVER_ERROR: &str = "Internal server error";

/// Message sent to clients when a presented token fails verification.
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// No credentials were presented (HTTP 401).
    Unauthorized(String),
    /// A session token was presented but is malformed, badly signed or expired (HTTP 403).
    /// Carries no reason; clients only see `INVALID_TOKEN_MESSAGE`.
    InvalidToken,
    /// Malformed or semantically invalid request (HTTP 400).
    BadRequest(String),
    /// The request collides with existing state, e.g. a taken username (HTTP 409).
    Conflict(String),
    /// Unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Failure reported by the relational store (HTTP 500).
    DatabaseError(String),
    /// Input failed field validation (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::InvalidToken => write!(f, "Forbidden: {}", INVALID_TOKEN_MESSAGE),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.as_str(),
            AppError::InvalidToken => INVALID_TOKEN_MESSAGE,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                log::error!("{}", self);
                GENERIC_SERVER_ERROR
            }
        };

        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts store failures into their HTTP-facing counterpart.
impl From<RepositoryError> for AppError {
    fn from(error: RepositoryError) -> AppError {
        match error {
            RepositoryError::Conflict(msg) => AppError::Conflict(msg),
            RepositoryError::MissingParent(msg) => AppError::BadRequest(msg),
            RepositoryError::Database(msg) => AppError::DatabaseError(msg),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// The blocking thread pool was shut down or the job panicked.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}
