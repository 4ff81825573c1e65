use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use mockall_double::double;
use std::sync::Arc;
use validator::Validate;

use super::helper::find_pending_otp;
use crate::{
    models::{GenericResponse, OtpQuery, OtpStatusResponse},
    utils::AppError,
};

#[double]
use crate::database::AppDatabase;

/// Get otp status
///
/// Reports whether the latest pending otp of the identifier and purpose is
/// still usable, so the client can choose between "resend" and "still pending".
#[utoipa::path(
    get,
    path = "/api/v1/otp/status",
    params(OtpQuery),
    responses(
        (status = 200, description = "Status of the latest pending otp", body = OtpStatusResponse),
        (status = 400, description = "Invalid query params", body = GenericResponse),
        (status = 404, description = "No pending otp", body = GenericResponse)
    ),
    tag = "OTP API"
)]
pub async fn otp_status_handler(
    State(db): State<Arc<AppDatabase>>,
    params: Query<OtpQuery>,
) -> Result<Json<OtpStatusResponse>, AppError> {
    params
        .validate()
        .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
    let identifier = params.identifier()?;
    let otp = find_pending_otp(&db, &identifier, params.purpose)
        .await?
        .ok_or(AppError::NotFound("No pending otp found".into()))?;
    let res = OtpStatusResponse::from_record(&otp, Utc::now());
    Ok(Json(res))
}
