use axum::{http::StatusCode, response::Response, Router};
use mongodb::{bson::doc, options::FindOneOptions};
use tower::ServiceExt;

use skincare_storefront_backend::{
    constants::*,
    database::AppDatabase,
    models::{OtpPurpose, OtpRecord},
};

use crate::helper::helper::{build_post_request, read_body, GenericResponse};

pub async fn send_otp(app: Router, email: &str, purpose: OtpPurpose) {
    let body = format!("{{\"email\": \"{email}\", \"purpose\": \"{purpose}\"}}");
    let request = build_post_request("/api/v1/otp/send", &body);
    let res = app.oneshot(request).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let response: GenericResponse = read_body(res).await;
    assert_eq!(response.success, true);
    assert_eq!(response.message, "Otp generated");
}

pub async fn verify_otp(app: Router, email: &str, purpose: OtpPurpose, otp: &str) -> Response {
    let body =
        format!("{{\"email\": \"{email}\", \"purpose\": \"{purpose}\", \"otp\": \"{otp}\"}}");
    let request = build_post_request("/api/v1/otp/verify", &body);
    app.oneshot(request).await.unwrap()
}

pub async fn latest_otp(db: &AppDatabase, email: &str, purpose: OtpPurpose) -> OtpRecord {
    let filter = doc! {"email": email, "purpose": purpose.as_str()};
    let options = FindOneOptions::builder()
        .sort(doc! {"createdAt": -1})
        .build();
    db.find_one::<OtpRecord>(DB_NAME, COLL_OTP, Some(filter), Some(options))
        .await
        .unwrap()
        .expect("otp record should exist")
}
