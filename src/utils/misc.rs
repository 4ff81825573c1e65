use rand::{rngs::OsRng, Rng};
use serde::{Deserialize, Deserializer};

use crate::constants::*;

/// Generate a 6 digit numeric OTP, uniformly drawn from
/// [`OTP_MIN_VALUE`, `OTP_MAX_VALUE`] using the OS CSPRNG
pub fn generate_otp() -> String {
    let code = OsRng.gen_range(OTP_MIN_VALUE..=OTP_MAX_VALUE);
    code.to_string()
}

/// Emails are matched case-insensitively and without surrounding whitespace
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Deserialize helper for optional contact fields.
/// Surrounding whitespace is dropped and a blank value counts as missing
pub fn trim_helper<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let val = Option::<String>::deserialize(deserializer)?;
    let val = val
        .map(|val| val.trim().to_owned())
        .filter(|val| !val.is_empty());
    Ok(val)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generate_otp_format() {
        for _ in 0..1000 {
            let otp = generate_otp();
            assert_eq!(otp.len(), OTP_LENGTH);
            assert_eq!(otp.chars().all(|ch| ch.is_ascii_digit()), true);
            let val = otp.parse::<u32>().unwrap();
            assert!(val >= OTP_MIN_VALUE);
            assert!(val <= OTP_MAX_VALUE);
        }
    }

    #[test]
    fn test_generate_otp_random() {
        let codes = (0..100).map(|_| generate_otp()).collect::<HashSet<_>>();
        assert!(codes.len() > 1);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  A@B.Com "), "a@b.com");
        assert_eq!(normalize_email("a@b.com"), "a@b.com");
        assert_eq!(normalize_email(""), "");
    }
}
