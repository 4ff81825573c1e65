use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::otp::{OtpIdentifier, OtpPurpose};
use crate::utils::{trim_helper, validate_otp_digits, validate_phonenumber, AppError};

fn identifier_or_err(
    email: &Option<String>,
    phone: &Option<String>,
) -> Result<OtpIdentifier, AppError> {
    OtpIdentifier::from_parts(email.as_deref(), phone.as_deref())
        .ok_or(AppError::BadRequestErr("Either email or phone is required".into()))
}

/// request body schema for sending a new otp
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SendOtpReq {
    #[serde(default, deserialize_with = "trim_helper")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trim_helper")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_phonenumber")]
    pub phone: Option<String>,

    pub purpose: OtpPurpose,
}

impl SendOtpReq {
    pub fn identifier(&self) -> Result<OtpIdentifier, AppError> {
        identifier_or_err(&self.email, &self.phone)
    }
}

/// request body schema for verifying an otp
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct VerifyOtpReq {
    #[serde(default, deserialize_with = "trim_helper")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trim_helper")]
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_phonenumber")]
    pub phone: Option<String>,

    pub purpose: OtpPurpose,

    #[validate(length(equal = 6), custom = "validate_otp_digits")]
    pub otp: String,
}

impl VerifyOtpReq {
    pub fn identifier(&self) -> Result<OtpIdentifier, AppError> {
        identifier_or_err(&self.email, &self.phone)
    }
}

/// query params selecting the otp records of one identifier and purpose
#[derive(Debug, Clone, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OtpQuery {
    #[serde(default, deserialize_with = "trim_helper")]
    #[validate(email)]
    pub email: Option<String>,

    #[serde(default, deserialize_with = "trim_helper")]
    #[validate(custom = "validate_phonenumber")]
    pub phone: Option<String>,

    pub purpose: OtpPurpose,
}

impl OtpQuery {
    pub fn identifier(&self) -> Result<OtpIdentifier, AppError> {
        identifier_or_err(&self.email, &self.phone)
    }
}
