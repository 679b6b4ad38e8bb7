//! Kiosk core: state machine, timers and the interactive runtime.

pub mod journal;
pub mod machine;
pub mod pay_period;
pub mod pin;
pub mod runtime;
pub mod session_clock;
pub mod timers;
pub mod wake_lock;
