pub mod auth;
pub mod boards;
pub mod health;
pub mod tasks;
pub mod users;

use std::sync::Arc;

use actix_web::{error::JsonPayloadError, error::PathError, web, HttpRequest};

use crate::auth::{AuthMiddleware, SessionCookieConfig, TokenService};
use crate::error::AppError;
use crate::repository::Repository;

/// Everything the handlers need, built once at startup and cloned per worker.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn Repository>,
    pub tokens: TokenService,
    pub cookies: SessionCookieConfig,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn Repository>,
        tokens: TokenService,
        cookies: SessionCookieConfig,
    ) -> Self {
        Self {
            repository,
            tokens,
            cookies,
        }
    }
}

/// Registers shared state, extractor error handlers and all routes.
///
/// `/`, `/health`, `/register`, `/login` and `/logout` are public; `/protected`,
/// `/users` and everything under `/api` require a session token.
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::from(state.repository))
            .app_data(web::Data::new(state.tokens))
            .app_data(web::Data::new(state.cookies))
            .app_data(web::JsonConfig::default().error_handler(json_error))
            .app_data(web::PathConfig::default().error_handler(path_error))
            .service(health::index)
            .service(health::health)
            .service(auth::register)
            .service(auth::login)
            .service(auth::logout)
            .service(users::protected)
            .service(users::list_users)
            .service(
                web::scope("/api")
                    .wrap(AuthMiddleware)
                    .service(boards::list_boards)
                    .service(boards::create_board)
                    .service(boards::list_columns)
                    .service(boards::create_column)
                    .service(tasks::list_tasks)
                    .service(tasks::create_task),
            );
    }
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

fn path_error(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid path parameter: {}", err)).into()
}
