use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::otp::{OtpRecord, OtpState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GenericResponse {
    pub success: bool,
    pub message: String,
}

/// response schema for otp status: tells whether the latest code can still be used
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OtpStatusResponse {
    pub success: bool,
    pub usable: bool,
    pub state: OtpState,
    pub attempts_remaining: u32,
    pub expires_at: DateTime<Utc>,
}

impl OtpStatusResponse {
    pub fn from_record(otp: &OtpRecord, now: DateTime<Utc>) -> Self {
        Self {
            success: true,
            usable: otp.is_usable_at(now),
            state: otp.state_at(now),
            attempts_remaining: otp.attempts_remaining(),
            expires_at: otp.expires_at,
        }
    }
}

/// response schema for otp cleanup
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub success: bool,
    pub deleted_count: u64,
}
