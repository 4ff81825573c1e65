use axum::http::StatusCode;
use serde_json::Value;
use tower::ServiceExt; // for `oneshot` and `ready`

mod helper;
use helper::{build_get_request, build_post_request, get_app, read_body, GenericResponse};

#[tokio::test]
async fn test_ping_route() {
    let app = get_app().await;
    let res = app.oneshot(build_get_request("/api/v1/ping")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, true);
    assert_eq!(response.message, "Storefront auth server is running");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = get_app().await;
    let res = app
        .oneshot(build_get_request("/api/v1/a-not-existing-path"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, false);
}

#[tokio::test]
async fn test_openapi_doc_is_served() {
    let app = get_app().await;
    let res = app
        .oneshot(build_get_request("/api-docs/openapi.json"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = read_body(res).await;
    assert!(doc["paths"]["/api/v1/otp/verify"].is_object());
}

// None of the requests below reach the store: they are rejected while the
// body or query is being validated.

#[tokio::test]
async fn test_send_otp_requires_identifier() {
    let app = get_app().await;
    let body = r#"{"purpose": "login"}"#;
    let res = app
        .oneshot(build_post_request("/api/v1/otp/send", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, false);
    assert_eq!(response.message, "Either email or phone is required");
}

#[tokio::test]
async fn test_send_otp_rejects_invalid_email() {
    let app = get_app().await;
    let body = r#"{"email": "not-an-email", "purpose": "login"}"#;
    let res = app
        .oneshot(build_post_request("/api/v1/otp/send", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, false);
}

#[tokio::test]
async fn test_send_otp_rejects_invalid_phone() {
    let app = get_app().await;
    let body = r#"{"phone": "12345", "purpose": "verify_phone"}"#;
    let res = app
        .oneshot(build_post_request("/api/v1/otp/send", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let response: GenericResponse = read_body(res).await;
    assert!(response.message.contains("Phone must be 10 to 15 digits"));
}

#[tokio::test]
async fn test_send_otp_rejects_unknown_purpose() {
    let app = get_app().await;
    let body = r#"{"email": "shopper@example.com", "purpose": "checkout"}"#;
    let res = app
        .oneshot(build_post_request("/api/v1/otp/send", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, false);
}

#[tokio::test]
async fn test_verify_otp_rejects_malformed_code() {
    let app = get_app().await;
    for otp in ["12345", "1234567", "12a456"] {
        let body =
            format!(r#"{{"email": "shopper@example.com", "purpose": "login", "otp": "{otp}"}}"#);
        let res = app
            .clone()
            .oneshot(build_post_request("/api/v1/otp/verify", &body))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "otp: {otp}");
    }
}

#[tokio::test]
async fn test_status_requires_identifier() {
    let app = get_app().await;
    let res = app
        .oneshot(build_get_request("/api/v1/otp/status?purpose=login"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.message, "Either email or phone is required");
}
