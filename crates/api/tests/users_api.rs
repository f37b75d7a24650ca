//! HTTP-level integration tests for registration, login, the current-user
//! endpoint and logout.

mod common;

use axum::http::StatusCode;
use common::{
    body_bytes, body_json, build_test_app, delete, delete_auth, get, get_auth, post_json, TestApp,
};
use todo_core::session::SessionKind;
use todo_db::UserStore;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register through the API and return `(user_id, token)`.
async fn register(app: &TestApp, email: &str, password: &str) -> (String, String) {
    let body = serde_json::json!({ "email": email, "password": password });
    let response = post_json(app.router.clone(), "/users", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = response
        .headers()
        .get("x-auth")
        .expect("register must return x-auth")
        .to_str()
        .unwrap()
        .to_string();
    let json = body_json(response).await;
    (json["_id"].as_str().unwrap().to_string(), token)
}

async fn stored_sessions(app: &TestApp, email: &str) -> Vec<String> {
    app.memory
        .find_user_by_email(email)
        .await
        .unwrap()
        .expect("user should exist")
        .sessions
        .into_iter()
        .map(|s| s.token)
        .collect()
}

// ---------------------------------------------------------------------------
// POST /users
// ---------------------------------------------------------------------------

#[tokio::test]
async fn register_returns_user_and_token() {
    let app = build_test_app();

    let body = serde_json::json!({ "email": "a@a.com", "password": "secret1" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let token = response
        .headers()
        .get("x-auth")
        .expect("x-auth header must be present")
        .to_str()
        .unwrap()
        .to_string();
    let json = body_json(response).await;
    assert_eq!(json["email"], "a@a.com");
    assert!(json["_id"].is_string());
    assert!(json.get("password_hash").is_none(), "hash must never be serialized");
    assert!(json.get("sessions").is_none(), "sessions must never be serialized");

    let user = app
        .memory
        .find_user_by_email("a@a.com")
        .await
        .unwrap()
        .expect("user should be stored");
    assert_ne!(user.password_hash, "secret1");
    assert!(user.has_session(SessionKind::Auth, &token));
    assert_eq!(json["_id"], user.id.to_string());
}

#[tokio::test]
async fn register_normalizes_email() {
    let app = build_test_app();

    let body = serde_json::json!({ "email": "  Test@Test.ME ", "password": "passwordWhut" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["email"], "test@test.me");
}

#[tokio::test]
async fn register_rejects_missing_fields() {
    let app = build_test_app();

    let body = serde_json::json!({ "invalidEmail": "invalidemail.com", "invalidPassword": "1" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-auth").is_none());
}

#[tokio::test]
async fn register_rejects_malformed_email() {
    let app = build_test_app();

    let body = serde_json::json!({ "email": "invalidemail.com", "password": "secret1" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn register_rejects_email_without_dotted_domain() {
    let app = build_test_app();

    for email in ["a@localhost", "a@a", "x@[127.0.0.1]"] {
        let body = serde_json::json!({ "email": email, "password": "secret1" });
        let response = post_json(app.router.clone(), "/users", body).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{email} must be rejected");
        assert!(response.headers().get("x-auth").is_none());
    }
}

#[tokio::test]
async fn register_rejects_short_password() {
    let app = build_test_app();

    let body = serde_json::json!({ "email": "short@pw.com", "password": "12345" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app
        .memory
        .find_user_by_email("short@pw.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn register_rejects_email_in_use() {
    let app = build_test_app();
    register(&app, "dave@dave.com", "userOnePassword").await;

    let body = serde_json::json!({ "email": "dave@dave.com", "password": "password" });
    let response = post_json(app.router.clone(), "/users", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-auth").is_none());
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

// ---------------------------------------------------------------------------
// POST /users/login
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_appends_session_matching_header() {
    let app = build_test_app();
    let (user_id, register_token) = register(&app, "thing@thing.com", "userTwoPassword").await;

    let body = serde_json::json!({ "email": "thing@thing.com", "password": "userTwoPassword" });
    let response = post_json(app.router.clone(), "/users/login", body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let token = response
        .headers()
        .get("x-auth")
        .expect("login must return x-auth")
        .to_str()
        .unwrap()
        .to_string();
    assert_ne!(token, register_token, "every login issues a fresh token");
    let json = body_json(response).await;
    assert_eq!(json["_id"], user_id);

    let sessions = stored_sessions(&app, "thing@thing.com").await;
    assert_eq!(sessions, vec![register_token, token]);
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = build_test_app();
    register(&app, "thing@thing.com", "userTwoPassword").await;
    let before = stored_sessions(&app, "thing@thing.com").await;

    let body = serde_json::json!({ "email": "thing@thing.com", "password": "ncc-1701" });
    let response = post_json(app.router.clone(), "/users/login", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response.headers().get("x-auth").is_none());
    assert_eq!(stored_sessions(&app, "thing@thing.com").await, before);
}

#[tokio::test]
async fn login_failures_look_identical() {
    let app = build_test_app();
    register(&app, "thing@thing.com", "userTwoPassword").await;

    let wrong_password = post_json(
        app.router.clone(),
        "/users/login",
        serde_json::json!({ "email": "thing@thing.com", "password": "ncc-1701" }),
    )
    .await;
    let unknown_user = post_json(
        app.router.clone(),
        "/users/login",
        serde_json::json!({ "email": "ghost@ghost.com", "password": "ncc-1701" }),
    )
    .await;

    assert_eq!(wrong_password.status(), unknown_user.status());
    assert_eq!(body_json(wrong_password).await, body_json(unknown_user).await);
}

// ---------------------------------------------------------------------------
// GET /users/me
// ---------------------------------------------------------------------------

#[tokio::test]
async fn me_returns_authenticated_user() {
    let app = build_test_app();
    let (user_id, token) = register(&app, "dave@dave.com", "userOnePassword").await;

    let response = get_auth(app.router.clone(), "/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["_id"], user_id);
    assert_eq!(json["email"], "dave@dave.com");
}

#[tokio::test]
async fn me_without_token_is_401_with_empty_body() {
    let app = build_test_app();

    let response = get(app.router.clone(), "/users/me").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn me_with_garbage_token_is_401() {
    let app = build_test_app();

    let response = get_auth(app.router.clone(), "/users/me", "not-a-token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn me_with_signed_but_unstored_token_is_401() {
    let app = build_test_app();
    register(&app, "dave@dave.com", "userOnePassword").await;
    let user = app
        .memory
        .find_user_by_email("dave@dave.com")
        .await
        .unwrap()
        .unwrap();

    // Correctly signed for a real user, but never added to the session list.
    let token = app
        .state
        .credentials
        .issuer()
        .issue(user.id, SessionKind::Auth)
        .unwrap();
    let response = get_auth(app.router.clone(), "/users/me", &token).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// DELETE /users/me/token
// ---------------------------------------------------------------------------

#[tokio::test]
async fn logout_removes_token() {
    let app = build_test_app();
    let (_user_id, token) = register(&app, "dave@dave.com", "userOnePassword").await;

    let response = delete_auth(app.router.clone(), "/users/me/token", &token).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_bytes(response).await.is_empty());
    assert!(stored_sessions(&app, "dave@dave.com").await.is_empty());

    // The signature is still valid, but the session is revoked.
    assert!(app.state.credentials.issuer().verify(&token).is_ok());
    let response = get_auth(app.router.clone(), "/users/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_keeps_other_sessions() {
    let app = build_test_app();
    let (_user_id, first) = register(&app, "dave@dave.com", "userOnePassword").await;

    let body = serde_json::json!({ "email": "dave@dave.com", "password": "userOnePassword" });
    let response = post_json(app.router.clone(), "/users/login", body).await;
    let second = response
        .headers()
        .get("x-auth")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();

    let response = delete_auth(app.router.clone(), "/users/me/token", &first).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(stored_sessions(&app, "dave@dave.com").await, vec![second.clone()]);
    let response = get_auth(app.router.clone(), "/users/me", &second).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_requires_authentication() {
    let app = build_test_app();

    let response = delete(app.router.clone(), "/users/me/token").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
