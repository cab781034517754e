mod common;

use actix_web::{
    body::MessageBody,
    cookie::time::Duration as CookieDuration,
    dev::{Service, ServiceResponse},
    http::{header, StatusCode},
    test, App, HttpServer,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::net::TcpListener;
use std::time::{Duration, Instant};
use taskboard::auth::{AuthResponse, Claims, SESSION_COOKIE};
use taskboard::routes;

use common::{bearer, register_user, test_state, tokens, TEST_SECRET};

#[actix_rt::test]
async fn test_register_login_and_protected_flow() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;

    let (registered, _t1) = register_user(&app, "alice", "secret123").await;
    assert_eq!(registered.username, "alice");

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "alice", "password": "secret123" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let login: AuthResponse = test::read_body_json(resp).await;

    let logged_in = tokens().verify(&login.token).unwrap();
    assert_eq!(logged_in, registered);

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header(bearer(&login.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["username"], "alice");
    assert_eq!(body["user"]["id"], registered.id);
    assert!(body["message"].is_string());

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_protected_rejects_bad_tokens() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    let (identity, token) = register_user(&app, "bob", "hunter22").await;

    let now = chrono::Utc::now().timestamp();
    let expired = encode(
        &Header::default(),
        &Claims {
            sub: identity.id,
            username: identity.username.clone(),
            iat: now - 7200,
            exp: now - 3600,
        },
        &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
    )
    .unwrap();

    let forged = encode(
        &Header::default(),
        &Claims {
            sub: identity.id,
            username: identity.username.clone(),
            iat: now,
            exp: now + 3600,
        },
        &EncodingKey::from_secret(b"not-the-server-secret"),
    )
    .unwrap();

    let signature_start = token.rfind('.').unwrap() + 1;
    let mut tampered = token.clone().into_bytes();
    let target = signature_start + 3;
    tampered[target] = if tampered[target] == b'x' { b'y' } else { b'x' };
    let tampered = String::from_utf8(tampered).unwrap();

    for (description, bad_token) in [
        ("expired", expired),
        ("forged", forged),
        ("tampered", tampered),
        ("garbage", "definitely-not-a-jwt".to_string()),
    ] {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(bearer(&bad_token))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{} token", description);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid or expired token", "{} token", description);
    }
}

#[actix_rt::test]
async fn test_raw_authorization_header_is_accepted() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    let (_, token) = register_user(&app, "carol", "password1").await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_duplicate_registration_conflicts() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    register_user(&app, "dave", "password1").await;

    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({ "username": "dave", "password": "another-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;

    let test_cases = vec![
        (json!({ "password": "Password123!" }), "missing username"),
        (json!({ "username": "testuser" }), "missing password"),
        (json!({}), "empty body"),
        (json!({ "username": "u", "password": "Password123!" }), "username too short"),
        (
            json!({ "username": "a".repeat(33), "password": "Password123!" }),
            "username too long",
        ),
        (
            json!({ "username": "user name!", "password": "Password123!" }),
            "username with invalid chars",
        ),
        (json!({ "username": "testuser", "password": "123" }), "password too short"),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/register")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "Test case failed: {}", description);
        assert!(body["error"].is_string(), "Test case failed: {}", description);
    }

    let req = test::TestRequest::post()
        .uri("/register")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    register_user(&app, "erin", "Password123!").await;

    let test_cases = vec![
        (json!({ "password": "Password123!" }), "missing username"),
        (json!({ "username": "erin" }), "missing password"),
        (json!({ "username": "erin", "password": "" }), "empty password"),
        (
            json!({ "username": "erin", "password": "WrongPassword123!" }),
            "incorrect password",
        ),
        (
            json!({ "username": "nobody", "password": "Password123!" }),
            "non-existent user",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            StatusCode::BAD_REQUEST,
            "Test case failed: {}",
            description
        );
    }
}

async fn timed_login(
    app: &impl Service<
        actix_http::Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
    >,
    username: &str,
) -> Duration {
    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": username, "password": "WrongPassword123!" }))
        .to_request();
    let started = Instant::now();
    let resp = test::call_service(app, req).await;
    let elapsed = started.elapsed();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid credentials");
    elapsed
}

#[actix_rt::test]
async fn test_unknown_user_login_costs_a_bcrypt_check() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    register_user(&app, "ivan", "Password123!").await;

    // First unknown-user login also hashes the throwaway password.
    timed_login(&app, "nobody").await;

    let wrong_password = timed_login(&app, "ivan").await;
    let unknown_user = timed_login(&app, "nobody").await;

    assert!(
        unknown_user >= Duration::from_millis(5),
        "unknown user answered in {:?}",
        unknown_user
    );
    assert!(
        unknown_user * 5 >= wrong_password,
        "unknown user {:?} vs wrong password {:?}",
        unknown_user,
        wrong_password
    );
}

#[actix_rt::test]
async fn test_cookie_session_and_logout() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    register_user(&app, "frank", "password1").await;

    let req = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "username": "frank", "password": "password1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let cookie = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("login should set the session cookie");
    assert_eq!(cookie.http_only(), Some(true));
    let body: AuthResponse = test::read_body_json(resp).await;
    assert_eq!(cookie.value(), body.token);

    let req = test::TestRequest::get()
        .uri("/protected")
        .cookie(cookie.clone())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::post().uri("/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let removal = resp
        .response()
        .cookies()
        .find(|c| c.name() == SESSION_COOKIE)
        .map(|c| c.into_owned())
        .expect("logout should clear the session cookie");
    assert_eq!(removal.value(), "");
    assert_eq!(removal.max_age(), Some(CookieDuration::ZERO));
}

#[actix_rt::test]
async fn test_users_listing_hides_passwords() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;
    let (_, token) = register_user(&app, "grace", "password1").await;
    register_user(&app, "heidi", "password2").await;

    let req = test::TestRequest::get().uri("/users").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/users")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Value = test::read_body_json(resp).await;

    assert_eq!(
        users,
        json!([
            { "id": 1, "username": "grace" },
            { "id": 2, "username": "heidi" }
        ])
    );
}

#[actix_rt::test]
async fn test_liveness_endpoint() {
    let app = test::init_service(App::new().configure(routes::configure(test_state()))).await;

    let req = test::TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert!(!body.is_empty());
}

#[actix_rt::test]
async fn test_create_task_unauthorized_over_http() {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let state = test_state();
    let server = HttpServer::new(move || App::new().configure(routes::configure(state.clone())))
        .workers(1)
        .listen(listener)
        .expect("Failed to listen")
        .run();
    let handle = server.handle();
    actix_rt::spawn(server);

    let client = reqwest::Client::new();
    let base = format!("http://127.0.0.1:{}", port);

    let resp = client
        .post(format!("{}/api/tasks", base))
        .json(&json!({ "column_id": 1, "title": "Unauthorized Task" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::UNAUTHORIZED);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Missing token");

    let resp = client
        .get(format!("{}/protected", base))
        .bearer_auth("tampered.or.garbage")
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::FORBIDDEN);

    handle.stop(true).await;
}
