pub mod colors;
pub mod date;
pub mod formatting;
pub mod path;
pub mod redact;
pub mod table;
pub mod time;

pub use formatting::hours2readable;
pub use redact::redact;
