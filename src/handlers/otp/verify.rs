use axum::{extract::State, Json};
use mockall_double::double;
use std::sync::Arc;

use super::helper::{verify_otp, VerifyOutcome};
use crate::{
    models::{GenericResponse, OtpRecord, OtpState, VerifyOtpReq},
    utils::{AppError, ValidatedBody},
};

#[double]
use crate::database::AppDatabase;

/// Verify otp
///
/// Checks the given otp against the latest pending code of the identifier
/// and purpose. Every check spends one attempt, right or wrong.
#[utoipa::path(
    post,
    path = "/api/v1/otp/verify",
    request_body = VerifyOtpReq,
    responses(
        (status = 200, description = "Otp verified", body = GenericResponse),
        (status = 400, description = "Wrong, expired or exhausted otp", body = GenericResponse),
        (status = 404, description = "No pending otp, a new one must be requested", body = GenericResponse),
        (status = 500, description = "Store failure, safe to retry", body = GenericResponse)
    ),
    tag = "OTP API"
)]
pub async fn verify_otp_handler(
    State(db): State<Arc<AppDatabase>>,
    ValidatedBody(body): ValidatedBody<VerifyOtpReq>,
) -> Result<Json<GenericResponse>, AppError> {
    let identifier = body.identifier()?;
    match verify_otp(&db, &identifier, body.purpose, &body.otp).await? {
        VerifyOutcome::Verified(_) => {
            let res = GenericResponse {
                success: true,
                message: "Otp verified".to_owned(),
            };
            Ok(Json(res))
        }
        VerifyOutcome::Rejected(otp) => Err(AppError::BadRequestErr(rejection_message(&otp))),
        VerifyOutcome::NotFound => {
            let msg = "No pending otp found, please request a new otp".to_owned();
            Err(AppError::NotFound(msg))
        }
    }
}

fn rejection_message(otp: &OtpRecord) -> String {
    match otp.state() {
        OtpState::Pending => format!(
            "Invalid otp, {} attempt(s) remaining",
            otp.attempts_remaining()
        ),
        OtpState::Exhausted => "Maximum otp attempts exceeded, please request a new otp".into(),
        OtpState::Expired => "Otp expired, please request a new otp".into(),
        OtpState::Verified => "Otp already used".into(),
    }
}
