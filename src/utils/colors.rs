/// ANSI color helper utilities for terminal output.
use crate::models::ActionTone;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

/// Button colour for an action tone.
pub fn color_for_tone(tone: ActionTone) -> &'static str {
    match tone {
        ActionTone::Go => GREEN,
        ActionTone::Stop => RED,
        ActionTone::Pause => YELLOW,
        ActionTone::Resume => BLUE,
    }
}

pub fn paint(color: &str, value: &str) -> String {
    format!("{color}{value}{RESET}")
}

/// Grey out placeholder values ("--:--", empty).
pub fn colorize_optional(value: &str) -> String {
    if value.trim().is_empty() || value.trim() == "--:--" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}
