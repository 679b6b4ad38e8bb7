use super::clock_state::ClockStatus;
use serde::Serialize;

/// A single punch the kiosk can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PunchAction {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionTone {
    Go,
    Stop,
    Pause,
    Resume,
}

impl PunchAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PunchAction::ClockIn => "clock_in",
            PunchAction::ClockOut => "clock_out",
            PunchAction::BreakStart => "break_start",
            PunchAction::BreakEnd => "break_end",
        }
    }

    /// Button label on the confirm step.
    pub fn label(&self) -> &'static str {
        match self {
            PunchAction::ClockIn => "Clock In",
            PunchAction::ClockOut => "Clock Out",
            PunchAction::BreakStart => "Start Break",
            PunchAction::BreakEnd => "End Break",
        }
    }

    /// Headline on the success step.
    pub fn success_message(&self) -> &'static str {
        match self {
            PunchAction::ClockIn => "Clocked In!",
            PunchAction::ClockOut => "Clocked Out!",
            PunchAction::BreakStart => "Break Started!",
            PunchAction::BreakEnd => "Break Ended!",
        }
    }

    pub fn tone(&self) -> ActionTone {
        match self {
            PunchAction::ClockIn => ActionTone::Go,
            PunchAction::ClockOut => ActionTone::Stop,
            PunchAction::BreakStart => ActionTone::Pause,
            PunchAction::BreakEnd => ActionTone::Resume,
        }
    }
}

/// Which action button the employee pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionSlot {
    Primary,
    Secondary,
}

/// Actions offered on the confirm step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionChoice {
    pub primary: PunchAction,
    pub secondary: Option<PunchAction>,
}

impl ActionChoice {
    /// Status → action mapping. On break the only way forward is ending it.
    pub fn for_status(status: ClockStatus) -> Self {
        match status {
            ClockStatus::ClockedOut => ActionChoice {
                primary: PunchAction::ClockIn,
                secondary: None,
            },
            ClockStatus::ClockedIn => ActionChoice {
                primary: PunchAction::ClockOut,
                secondary: Some(PunchAction::BreakStart),
            },
            ClockStatus::OnBreak => ActionChoice {
                primary: PunchAction::BreakEnd,
                secondary: None,
            },
        }
    }

    pub fn pick(&self, slot: ActionSlot) -> Option<PunchAction> {
        match slot {
            ActionSlot::Primary => Some(self.primary),
            ActionSlot::Secondary => self.secondary,
        }
    }
}
