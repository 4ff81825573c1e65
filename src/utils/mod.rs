pub mod error_handler;
pub mod misc;
pub mod validation;

pub use error_handler::AppError;
pub use misc::*;
pub use validation::validate_otp_digits;
pub use validation::validate_phonenumber;
pub use validation::ValidatedBody;
