use chrono::{DateTime, Duration, Utc};
use mongodb::bson::{oid::ObjectId, serde_helpers::chrono_datetime_as_bson_datetime, Document};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::{constants::*, utils::normalize_email};

/// Authentication step a code is scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    Login,
    Register,
    ResetPassword,
    VerifyEmail,
    VerifyPhone,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Register => "register",
            Self::ResetPassword => "reset_password",
            Self::VerifyEmail => "verify_email",
            Self::VerifyPhone => "verify_phone",
        }
    }
}

impl fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The contact channel a lookup is keyed on.
/// Email is authoritative whenever both channels are supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OtpIdentifier {
    Email(String),
    Phone(String),
}

impl OtpIdentifier {
    pub fn email(email: &str) -> Self {
        Self::Email(normalize_email(email))
    }

    pub fn phone(phone: &str) -> Self {
        Self::Phone(phone.trim().to_owned())
    }

    /// Picks the authoritative identifier out of optional request fields.
    /// Blank values count as missing.
    pub fn from_parts(email: Option<&str>, phone: Option<&str>) -> Option<Self> {
        let email = email.filter(|e| !e.trim().is_empty());
        let phone = phone.filter(|p| !p.trim().is_empty());
        match (email, phone) {
            (Some(email), _) => Some(Self::email(email)),
            (None, Some(phone)) => Some(Self::phone(phone)),
            (None, None) => None,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Email(val) | Self::Phone(val) => val.as_str(),
        }
    }

    /// Base filter selecting every record of this identifier and purpose
    pub fn to_filter(&self, purpose: OtpPurpose) -> Document {
        let mut filter = Document::new();
        filter.insert(self.field(), self.value());
        filter.insert("purpose", purpose.as_str());
        filter
    }
}

impl fmt::Display for OtpIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field(), self.value())
    }
}

/// Lifecycle state of a record. Everything except `Pending` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OtpState {
    Pending,
    Verified,
    Expired,
    Exhausted,
}

impl fmt::Display for OtpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Verified => "VERIFIED",
            Self::Expired => "EXPIRED",
            Self::Exhausted => "EXHAUSTED",
        };
        f.write_str(s)
    }
}

/// One issued one-time code and its verification state, as stored in `otps`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OtpRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    pub code: String,
    pub purpose: OtpPurpose,
    pub verified: bool,
    pub attempt_count: u32,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,

    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl OtpRecord {
    pub fn new(identifier: &OtpIdentifier, purpose: OtpPurpose, code: &str) -> Self {
        Self::new_at(identifier, purpose, code, Utc::now())
    }

    pub fn new_at(
        identifier: &OtpIdentifier,
        purpose: OtpPurpose,
        code: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let (email, phone) = match identifier {
            OtpIdentifier::Email(email) => (Some(email.clone()), None),
            OtpIdentifier::Phone(phone) => (None, Some(phone.clone())),
        };
        Self {
            id: None,
            email,
            phone,
            code: code.to_owned(),
            purpose,
            verified: false,
            attempt_count: 0,
            expires_at: now + Duration::minutes(OTP_VALIDITY_MINS),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn identifier(&self) -> Option<OtpIdentifier> {
        let email = self.email.as_deref();
        let phone = self.phone.as_deref();
        OtpIdentifier::from_parts(email, phone)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempt_count >= OTP_MAX_ATTEMPTS
    }

    pub fn attempts_remaining(&self) -> u32 {
        OTP_MAX_ATTEMPTS.saturating_sub(self.attempt_count)
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> OtpState {
        if self.verified {
            OtpState::Verified
        } else if self.is_expired_at(now) {
            OtpState::Expired
        } else if self.is_exhausted() {
            OtpState::Exhausted
        } else {
            OtpState::Pending
        }
    }

    pub fn state(&self) -> OtpState {
        self.state_at(Utc::now())
    }

    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.state_at(now) == OtpState::Pending
    }

    pub fn is_usable(&self) -> bool {
        self.is_usable_at(Utc::now())
    }

    /// Consumes one attempt and checks `input` against the code.
    ///
    /// Terminal records (verified, expired or exhausted) are left untouched
    /// and always return `false`. Otherwise the attempt counter is bumped
    /// before the comparison, so a wrong code still costs an attempt.
    pub fn verify_at(&mut self, input: &str, now: DateTime<Utc>) -> bool {
        if !self.is_usable_at(now) {
            return false;
        }
        self.attempt_count += 1;
        self.updated_at = now;
        if self.code != input {
            return false;
        }
        self.verified = true;
        true
    }

    pub fn verify(&mut self, input: &str) -> bool {
        self.verify_at(input, Utc::now())
    }
}
