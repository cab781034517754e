#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "Domain models, the board/column/task repository, session authentication,"]
#![doc = "routing configuration and error handling for the task board backend."]
#![doc = "The binary (`main.rs`) loads configuration, opens the database pool and"]
#![doc = "serves `routes::configure`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;

pub use crate::error::AppError;
pub use crate::routes::{configure, AppState};
