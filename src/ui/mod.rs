pub mod keys;
pub mod messages;
pub mod render;
