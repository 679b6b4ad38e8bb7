pub mod config;
pub mod init;
pub mod kiosk;
pub mod log;
pub mod verify;
