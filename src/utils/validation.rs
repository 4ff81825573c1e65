use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest},
    http::Request,
    Json, RequestExt,
};
use validator::{Validate, ValidationError};

use super::AppError;
use crate::constants::*;

/// Custom validator function to check phone number.
/// Accepts 10 to 15 digits with an optional leading `+`
pub fn validate_phonenumber(phone: &str) -> Result<(), ValidationError> {
    let digits = phone.strip_prefix('+').unwrap_or(phone);
    if digits.len() < PHONE_MIN_DIGITS || digits.len() > PHONE_MAX_DIGITS {
        let mut err = ValidationError::new("phone");
        err.message = Some(
            format!(
                "Phone must be {PHONE_MIN_DIGITS} to {PHONE_MAX_DIGITS} digits. Invalid phone received: {phone}"
            )
            .into(),
        );
        return Err(err);
    }
    if !digits.chars().all(|ch| ch.is_ascii_digit()) {
        let mut err = ValidationError::new("phone");
        err.message =
            Some(format!("Phone must be all digits. Invalid phone received: {phone}").into());
        return Err(err);
    }

    Ok(())
}

/// Custom validator function to check that an otp is all digits
pub fn validate_otp_digits(otp: &str) -> Result<(), ValidationError> {
    if !otp.chars().all(|ch| ch.is_ascii_digit()) {
        let mut err = ValidationError::new("otp");
        err.message = Some("Otp must be all digits".into());
        return Err(err);
    }
    Ok(())
}

/// JSON body extractor which runs `validator` rules before the handler sees the value
pub struct ValidatedBody<T>(pub T);

#[async_trait]
impl<S, B, T> FromRequest<S, B> for ValidatedBody<T>
where
    B: Send + 'static,
    S: Send + Sync,
    T: Validate + 'static,
    Json<T>: FromRequest<(), B, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request<B>, _state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = req
            .extract::<Json<T>, _>()
            .await
            .map_err(|err| AppError::BadRequestErr(err.body_text()))?;
        data.validate()
            .map_err(|err| AppError::BadRequestErr(err.to_string()))?;
        Ok(Self(data))
    }
}
