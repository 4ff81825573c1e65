use axum::{extract::State, Json};
use mockall_double::double;
use std::sync::Arc;

use super::helper::{deliver_otp, issue_otp};
use crate::{
    models::{GenericResponse, SendOtpReq},
    utils::{AppError, ValidatedBody},
};

#[double]
use crate::database::AppDatabase;

/// Send otp
///
/// Clears stale codes of the identifier and purpose, then generates a new otp
/// and sends it to the email or phone. Email wins when both are given.
#[utoipa::path(
    post,
    path = "/api/v1/otp/send",
    request_body = SendOtpReq,
    responses(
        (status = 200, description = "Otp generated and sent", body = GenericResponse),
        (status = 400, description = "Invalid request body", body = GenericResponse),
        (status = 500, description = "Store failure, safe to retry", body = GenericResponse)
    ),
    tag = "OTP API"
)]
pub async fn send_otp_handler(
    State(db): State<Arc<AppDatabase>>,
    ValidatedBody(body): ValidatedBody<SendOtpReq>,
) -> Result<Json<GenericResponse>, AppError> {
    let identifier = body.identifier()?;
    let otp = issue_otp(&db, &identifier, body.purpose).await?;
    deliver_otp(&otp)?;
    let res = GenericResponse {
        success: true,
        message: "Otp generated".to_owned(),
    };
    Ok(Json(res))
}
