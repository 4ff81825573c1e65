pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MONGO_MIN_POOL_SIZE: u32 = 5;
pub const MONGO_MAX_POOL_SIZE: u32 = 10;
pub const MONGO_CONN_TIMEOUT: u64 = 10;
pub const DEFAULT_PORT: u16 = 3000;

pub const OTP_LENGTH: usize = 6;
pub const OTP_MIN_VALUE: u32 = 100_000;
pub const OTP_MAX_VALUE: u32 = 999_999;
pub const OTP_VALIDITY_MINS: i64 = 10;
pub const OTP_MAX_ATTEMPTS: u32 = 5;
// every lost compare-and-set means another attempt was counted,
// so a verification can lose at most this many times
pub const OTP_VERIFY_RETRIES: u32 = OTP_MAX_ATTEMPTS + 1;

pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 15;

pub const DB_NAME: &str = "skincare_storefront";

pub const COLL_OTP: &str = "otps";
