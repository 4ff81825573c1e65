pub mod helper;
pub mod otp;

pub use helper::build_delete_request;
pub use helper::build_get_request;
pub use helper::build_post_request;
pub use helper::get_app;
pub use helper::get_database;
pub use helper::read_body;
pub use helper::unique_email;
pub use helper::GenericResponse;

pub use otp::latest_otp;
pub use otp::send_otp;
pub use otp::verify_otp;
