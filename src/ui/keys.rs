//! Maps one line of terminal input to machine inputs for the current step.
//!
//! The terminal stands in for the touch screen: each line is one or more
//! presses. Anything unrecognised still counts as a touch.

use crate::core::machine::{Input, StepKind};
use crate::models::{ActionSlot, CorrectionField};

/// Lines that stop the kiosk loop.
pub fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

pub fn parse_line(line: &str, step: StepKind) -> Vec<Input> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return vec![Input::Touch];
    }

    let lower = trimmed.to_ascii_lowercase();

    let input = match step {
        StepKind::StoreCode => Some(Input::SubmitStoreCode(trimmed.to_string())),
        StepKind::Pin => return pin_keys(&lower),
        StepKind::Confirm => match lower.as_str() {
            "1" => Some(Input::ChooseAction(ActionSlot::Primary)),
            "2" => Some(Input::ChooseAction(ActionSlot::Secondary)),
            "h" | "hours" => Some(Input::OpenMyHours),
            "d" | "done" => Some(Input::Done),
            _ => None,
        },
        StepKind::Countdown => match lower.as_str() {
            "x" | "c" | "cancel" => Some(Input::CancelCountdown),
            _ => None,
        },
        StepKind::Success => None,
        StepKind::MyHours => match lower.as_str() {
            "r" | "reload" => Some(Input::ReloadHours),
            "b" | "back" => Some(Input::CloseMyHours),
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(|n| Input::SelectEntry(n - 1)),
        },
        StepKind::EditEntry => edit_keys(trimmed, &lower),
    };

    vec![input.unwrap_or(Input::Touch)]
}

fn pin_keys(lower: &str) -> Vec<Input> {
    match lower {
        "c" | "clear" => return vec![Input::Clear],
        "b" | "<" | "back" => return vec![Input::Backspace],
        "s" | "store" => return vec![Input::ChangeStore],
        _ => {}
    }

    if lower.chars().all(|c| c.is_ascii_digit()) {
        return lower
            .bytes()
            .map(|b| Input::Digit(b - b'0'))
            .collect();
    }

    vec![Input::Touch]
}

fn edit_keys(trimmed: &str, lower: &str) -> Option<Input> {
    match lower {
        "s" | "submit" => return Some(Input::SubmitCorrection),
        "x" | "cancel" => return Some(Input::CancelCorrection),
        _ => {}
    }

    // A field name alone, or with "-", blanks that field.
    let (key, value) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let value = match value.trim() {
        "-" | "--" => "",
        other => other,
    };
    let field = match key.to_ascii_lowercase().as_str() {
        "in-date" => CorrectionField::ClockInDate,
        "in-time" => CorrectionField::ClockInTime,
        "out-date" => CorrectionField::ClockOutDate,
        "out-time" => CorrectionField::ClockOutTime,
        "reason" => CorrectionField::Reason,
        _ => return None,
    };

    Some(Input::EditField(field, value.to_string()))
}
