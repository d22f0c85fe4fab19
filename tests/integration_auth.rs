mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

use common::{FakeBackend, empty_profile, session_cookie, test_app};
use hanapbuhay::backend::session::ProfileCompletion;

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn register_payload() -> serde_json::Value {
    json!({
        "first_name": "Juan",
        "last_name": "Dela Cruz",
        "email": "juan@test.ph",
        "password": "Str0ng!pass",
        "confirm_password": "Str0ng!pass",
        "role_code": "SKR",
        "terms": true
    })
}

#[tokio::test]
async fn login_sets_session_cookies() {
    let mut fake = FakeBackend::new();
    fake.add_user("tok-skr", Some("SKR"), ProfileCompletion::Completed);
    fake.add_credentials("juan@test.ph", "Str0ng!pass", "tok-skr");
    let app = test_app(Arc::new(fake));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "juan@test.ph", "password": "Str0ng!pass" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("sb-access-token=tok-skr")));
    assert!(cookies.iter().any(|c| c.starts_with("sb-refresh-token=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));

    let body = json_body(response).await;
    assert_eq!(body["user"]["user_metadata"]["role_code"], "SKR");
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let mut fake = FakeBackend::new();
    fake.add_user("tok-skr", Some("SKR"), ProfileCompletion::Completed);
    fake.add_credentials("juan@test.ph", "Str0ng!pass", "tok-skr");
    let app = test_app(Arc::new(fake));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "juan@test.ph", "password": "wrong" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(response).await;
    // Never leaks which half of the credentials was wrong.
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn login_validates_the_payload() {
    let app = test_app(Arc::new(FakeBackend::new()));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "not-an-email", "password": "x" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_forwards_the_role_to_the_backend() {
    let fake = Arc::new(FakeBackend::new());
    let app = test_app(fake.clone());

    let response = app
        .oneshot(json_request("POST", "/api/auth/register", register_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let sign_ups = fake.sign_ups.lock().unwrap();
    assert_eq!(sign_ups.len(), 1);
    assert_eq!(sign_ups[0].email, "juan@test.ph");
    assert_eq!(sign_ups[0].data.role_code.as_deref(), Some("SKR"));
    assert_eq!(sign_ups[0].data.first_name.as_deref(), Some("Juan"));
}

#[tokio::test]
async fn register_rejects_mismatched_passwords() {
    let app = test_app(Arc::new(FakeBackend::new()));

    let mut payload = register_payload();
    payload["confirm_password"] = json!("Different1!");
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(response).await;
    assert_eq!(body["error"], "The passwords did not match");
}

#[tokio::test]
async fn register_rejects_weak_passwords() {
    let app = test_app(Arc::new(FakeBackend::new()));

    let mut payload = register_payload();
    payload["password"] = json!("alllowercase1!");
    payload["confirm_password"] = json!("alllowercase1!");
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_requires_terms_acceptance() {
    let app = test_app(Arc::new(FakeBackend::new()));

    let mut payload = register_payload();
    payload["terms"] = json!(false);
    let response = app
        .oneshot(json_request("POST", "/api/auth/register", payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn register_rejects_non_marketplace_roles() {
    // Admin accounts are provisioned out of band, and junk codes are junk.
    for role_code in ["admin", "XYZ", ""] {
        let app = test_app(Arc::new(FakeBackend::new()));
        let mut payload = register_payload();
        payload["role_code"] = json!(role_code);
        let response = app
            .oneshot(json_request("POST", "/api/auth/register", payload))
            .await
            .unwrap();

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "role_code {role_code:?}"
        );
    }
}

#[tokio::test]
async fn logout_clears_the_session_cookies() {
    let mut fake = FakeBackend::new();
    fake.add_user("tok-skr", Some("SKR"), ProfileCompletion::Completed);
    let app = test_app(Arc::new(fake));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, session_cookie("tok-skr"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies: Vec<_> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn logout_requires_a_session() {
    let app = test_app(Arc::new(FakeBackend::new()));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_returns_the_caller_and_profile() {
    let mut fake = FakeBackend::new();
    let user_id = fake.add_user("tok-skr", Some("SKR"), ProfileCompletion::Incomplete);
    fake.insert_profile(empty_profile(user_id));
    let app = test_app(Arc::new(fake));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(header::COOKIE, session_cookie("tok-skr"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["user"]["id"], user_id.to_string());
    assert_eq!(body["profile"]["user_id"], user_id.to_string());
}

#[tokio::test]
async fn me_tolerates_a_missing_profile_row() {
    let mut fake = FakeBackend::new();
    // Fresh from email confirmation: identity exists, profile not yet.
    fake.add_user("tok-new", Some("SKR"), ProfileCompletion::Incomplete);
    let app = test_app(Arc::new(fake));

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/auth/me")
                .header(header::COOKIE, session_cookie("tok-new"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["profile"].is_null());
}
