//! Rendering of the kiosk journal for `log --print`.

use crate::db::journal::{JournalRow, load_all};
use crate::errors::AppResult;
use ansi_term::Colour;
use regex::Regex;
use rusqlite::Connection;
use std::sync::OnceLock;

const OP_TARGET_MAX: usize = 48;

fn strip_ansi(s: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("ansi pattern"));
    re.replace_all(s, "").into_owned()
}

/// Colour of an operation name in the printed journal.
fn color_for_operation(op: &str) -> Colour {
    match op {
        "punch" | "pin_accepted" | "store_resolved" => Colour::Green,
        "correction" => Colour::Cyan,
        "lock" | "countdown" | "hours" => Colour::Blue,
        "countdown_cancel" | "store_cleared" => Colour::Yellow,
        "pin_rate_limited" => Colour::RGB(255, 153, 51),
        "init" => Colour::Purple,
        other if other.ends_with("_failed") || other.ends_with("_rejected") => Colour::Red,
        "pin_error" => Colour::Red,
        _ => Colour::White,
    }
}

/// One printed line per journal row.
pub fn format_rows(rows: &[JournalRow]) -> Vec<String> {
    let id_w = rows
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);

    let op_targets: Vec<String> = rows
        .iter()
        .map(|r| {
            let colour = color_for_operation(&r.operation);
            let mut text = colour.paint(r.operation.as_str()).to_string();
            if !r.target.is_empty() {
                text.push_str(&format!(" ({})", r.target));
            }
            truncate_visible(&text, &r.operation, colour)
        })
        .collect();

    let op_w = op_targets
        .iter()
        .map(|s| strip_ansi(s).chars().count())
        .max()
        .unwrap_or(10);

    rows.iter()
        .zip(op_targets)
        .map(|(row, op_target)| {
            let date = chrono::DateTime::parse_from_rfc3339(&row.date)
                .map(|dt| dt.format("%F %T").to_string())
                .unwrap_or_else(|_| row.date.clone());
            let pad = " ".repeat(op_w.saturating_sub(strip_ansi(&op_target).chars().count()));
            format!(
                "{:>id_w$}: {} | {}{} => {}",
                row.id, date, op_target, pad, row.message
            )
        })
        .collect()
}

/// Cut long operation+target text, keeping only the operation coloured.
fn truncate_visible(text: &str, op: &str, colour: Colour) -> String {
    let visible = strip_ansi(text);
    if visible.chars().count() <= OP_TARGET_MAX {
        return text.to_string();
    }

    let mut cut: String = visible.chars().take(OP_TARGET_MAX - 3).collect();
    cut.push_str("...");
    match cut.strip_prefix(op) {
        Some(rest) => format!("{}{}", colour.paint(op), rest),
        None => cut,
    }
}

pub fn print_journal(conn: &Connection) -> AppResult<()> {
    let rows = load_all(conn)?;
    if rows.is_empty() {
        println!("Journal is empty.");
        return Ok(());
    }

    println!("📜 Kiosk journal:\n");
    for line in format_rows(&rows) {
        println!("{line}");
    }
    Ok(())
}
