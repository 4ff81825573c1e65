use axum::{
    extract::{Query, State},
    Json,
};
use mockall_double::double;
use std::sync::Arc;
use validator::Validate;

use super::helper::cleanup_otps;
use crate::{
    models::{CleanupResponse, GenericResponse, OtpQuery},
    utils::AppError,
};

#[double]
use crate::database::AppDatabase;

/// Cleanup otp
///
/// Deletes verified, expired and exhausted otp records of the identifier and
/// purpose. Pending codes which are still usable are kept.
#[utoipa::path(
    delete,
    path = "/api/v1/otp",
    params(OtpQuery),
    responses(
        (status = 200, description = "Stale otp records deleted", body = CleanupResponse),
        (status = 400, description = "Invalid query params", body = GenericResponse)
    ),
    tag = "OTP API"
)]
pub async fn cleanup_otp_handler(
    State(db): State<Arc<AppDatabase>>,
    params: Query<OtpQuery>,
) -> Result<Json<CleanupResponse>, AppError> {
    params
        .validate()
        .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
    let identifier = params.identifier()?;
    let deleted_count = cleanup_otps(&db, &identifier, params.purpose).await?;
    let res = CleanupResponse {
        success: true,
        deleted_count,
    };
    Ok(Json(res))
}
