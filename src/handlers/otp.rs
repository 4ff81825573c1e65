pub mod cleanup;
pub mod helper;
pub mod send;
pub mod status;
pub mod verify;
