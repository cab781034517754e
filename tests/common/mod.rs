#![allow(dead_code)]

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test,
};
use serde_json::json;
use taskboard::{
    auth::{AuthResponse, Identity, SessionCookieConfig, TokenService},
    repository::InMemoryRepository,
    AppState,
};

pub const TEST_SECRET: &str = "integration-test-secret";

/// Fresh application state over an empty in-memory repository.
pub fn test_state() -> AppState {
    AppState::new(
        Arc::new(InMemoryRepository::new()),
        tokens(),
        SessionCookieConfig::default(),
    )
}

pub fn tokens() -> TokenService {
    TokenService::new(TEST_SECRET)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Registers `username` and returns the identity decoded from the issued token.
pub async fn register_user(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
    password: &str,
) -> (Identity, String) {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED, "registration of {} failed", username);

    let body: AuthResponse = test::read_body_json(resp).await;
    let identity = tokens()
        .verify(&body.token)
        .expect("registration token should verify");

    (identity, body.token)
}
