use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, App, HttpServer};
use taskboard::{
    auth::{SessionCookieConfig, TokenService},
    config::Config,
    repository::{postgres, PgRepository},
    routes, AppState,
};

fn cors(allowed_origins: &[String]) -> Cors {
    allowed_origins.iter().fold(
        Cors::default()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .supports_credentials()
            .max_age(3600),
        |cors, origin| cors.allowed_origin(origin),
    )
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        log::error!("Invalid configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;

    let pool = postgres::connect(&config).await.map_err(|e| {
        log::error!("Failed to connect to database: {}", e);
        io::Error::new(io::ErrorKind::ConnectionRefused, e)
    })?;
    postgres::run_migrations(&pool).await.map_err(|e| {
        log::error!("Failed to run migrations: {}", e);
        io::Error::new(io::ErrorKind::Other, e)
    })?;

    let state = AppState::new(
        Arc::new(PgRepository::new(pool)),
        TokenService::new(&config.jwt_secret),
        SessionCookieConfig {
            secure: config.cookie_secure,
        },
    );
    let allowed_origins = config.allowed_origins.clone();

    log::info!("Starting task board server at {}", config.server_url());
    HttpServer::new(move || {
        App::new()
            .wrap(cors(&allowed_origins))
            .wrap(Logger::default())
            .configure(routes::configure(state.clone()))
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
