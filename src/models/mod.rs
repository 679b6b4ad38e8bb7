//! Domain model shared by the kiosk state machine, backend and renderer.

pub mod clock_state;
pub mod edit_request;
pub mod employee;
pub mod hours;
pub mod punch_action;
pub mod tenant;

pub use clock_state::{ClockState, ClockStateError, ClockStatus};
pub use edit_request::{CorrectionDraft, CorrectionError, CorrectionField, EditRequest};
pub use employee::{EmployeeIdentity, EmployeeProfile, EmployeeSource};
pub use hours::{BreakRecord, HoursEntry};
pub use punch_action::{ActionChoice, ActionSlot, ActionTone, PunchAction};
pub use tenant::TenantContext;
