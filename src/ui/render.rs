//! Text rendering of the kiosk screens.

use crate::backend::KioskBackend;
use crate::core::machine::{HoursBoard, KioskMachine, Step};
use crate::models::clock_state::short_time;
use crate::models::{CorrectionDraft, HoursEntry, PunchAction};
use crate::utils::colors::{CYAN, GREEN, RED, color_for_tone, colorize_optional, paint};
use crate::utils::formatting::{bold, center, dim, hours_decimal};
use crate::utils::hours2readable;
use crate::utils::table::{Column, Table};
use crate::utils::time::format_minutes;
use chrono::Local;

const SCREEN_WIDTH: usize = 60;

pub fn render_screen<B: KioskBackend>(machine: &KioskMachine<B>) -> String {
    let mut out = String::new();

    let title = machine
        .tenant()
        .map(|t| t.tenant_name.as_str())
        .unwrap_or("Time Clock");
    out.push_str(&bold(&center(title, SCREEN_WIDTH)));
    out.push('\n');
    out.push_str(&"─".repeat(SCREEN_WIDTH));
    out.push_str("\n\n");

    match machine.step() {
        Step::StoreCode => {
            out.push_str("Enter the store code to set up this kiosk:\n");
            out.push_str(&dim("(letters and numbers, then Enter)"));
            out.push('\n');
        }
        Step::Pin => render_pin(machine, &mut out),
        Step::Confirm => render_confirm(machine, &mut out),
        Step::Countdown { action, remaining } => {
            out.push_str(&format!(
                "{} in {}...\n\n",
                paint(color_for_tone(action.tone()), action.label()),
                bold(&remaining.to_string())
            ));
            out.push_str(&dim("[x] Cancel"));
            out.push('\n');
        }
        Step::Success { action } => render_success(machine, *action, &mut out),
        Step::MyHours => {
            if let Some(board) = machine.session().and_then(|s| s.hours.as_ref()) {
                render_hours(board, &mut out);
            }
        }
        Step::EditEntry { draft } => render_edit(draft, &mut out),
    }

    if let Some(error) = machine.error() {
        out.push('\n');
        out.push_str(&paint(RED, error));
        out.push('\n');
    }

    out.push('\n');
    out.push_str(&"─".repeat(SCREEN_WIDTH));
    out.push('\n');
    out.push_str(&dim(&format!(
        "{}  {}",
        machine.clock().time_label(),
        machine.clock().date_label()
    )));
    out.push('\n');

    out
}

fn render_pin<B: KioskBackend>(machine: &KioskMachine<B>, out: &mut String) {
    out.push_str("Enter your PIN\n\n");

    let indicator = machine.pin().indicator();
    if machine.pin_shake() {
        out.push_str(&paint(RED, &format!("  {indicator}  ✗")));
    } else {
        out.push_str(&format!("  {indicator}"));
    }
    out.push_str("\n\n");
    out.push_str(&dim("[digits] enter  [c] clear  [b] backspace  [s] change store"));
    out.push('\n');
}

fn render_confirm<B: KioskBackend>(machine: &KioskMachine<B>, out: &mut String) {
    let Some(session) = machine.session() else {
        return;
    };

    out.push_str(&format!(
        "Hi, {}!\n",
        bold(session.employee.first_name())
    ));
    out.push_str(&paint(CYAN, &session.clock.describe()));
    out.push_str("\n\n");

    out.push_str(&action_button(1, session.choice.primary));
    if let Some(secondary) = session.choice.secondary {
        out.push_str("   ");
        out.push_str(&action_button(2, secondary));
    }
    out.push_str("\n\n");
    out.push_str(&dim("[h] My Hours  [d] Done"));
    out.push('\n');
}

fn action_button(key: u8, action: PunchAction) -> String {
    format!(
        "[{key}] {}",
        paint(color_for_tone(action.tone()), action.label())
    )
}

fn render_success<B: KioskBackend>(machine: &KioskMachine<B>, action: PunchAction, out: &mut String) {
    out.push_str(&paint(GREEN, &format!("✓ {}", action.success_message())));
    out.push('\n');
    if let Some(employee) = machine.employee() {
        out.push_str(&format!("Thanks, {}.\n", employee.first_name()));
    }
    out.push_str(&dim(&format!(
        "at {}",
        machine.clock().now().format("%-I:%M %p")
    )));
    out.push('\n');
}

fn render_hours(board: &HoursBoard, out: &mut String) {
    out.push_str(&format!("My Hours: {}\n\n", bold(&board.period.label())));

    if board.entries.is_empty() {
        out.push_str(&dim("No entries in this pay period."));
        out.push('\n');
    } else {
        let mut table = Table::new(vec![
            Column::new("#", 3),
            Column::new("Date", 10),
            Column::new("In", 8),
            Column::new("Out", 8),
            Column::new("Break", 8),
            Column::new("Net", 8),
            Column::new("", 10),
        ]);

        for (i, entry) in board.entries.iter().enumerate() {
            table.add_row(entry_row(i + 1, entry));
        }
        out.push_str(&table.render());
    }

    let total = board.total_net_seconds();
    out.push('\n');
    out.push_str(&format!(
        "Total: {} ({} h)\n\n",
        bold(&hours2readable(total)),
        hours_decimal(total)
    ));
    out.push_str(&dim("[#] request correction  [r] reload  [b] back"));
    out.push('\n');
}

/// Plain cells; the table pads by display width and colour codes would skew it.
fn entry_row(number: usize, entry: &HoursEntry) -> Vec<String> {
    let date = entry
        .clock_in
        .with_timezone(&Local)
        .format("%a %m/%d")
        .to_string();
    let clock_out = entry
        .clock_out
        .map(short_time)
        .unwrap_or_else(|| "--:--".to_string());
    let breaks = if entry.breaks.is_empty() {
        "--:--".to_string()
    } else {
        format_minutes(entry.break_seconds() / 60)
    };
    let net = entry
        .net_seconds()
        .map(hours_decimal)
        .unwrap_or_else(|| "--:--".to_string());
    let flag = if entry.has_pending_edit {
        "pending".to_string()
    } else if !entry.is_complete() {
        "open".to_string()
    } else {
        String::new()
    };

    vec![
        number.to_string(),
        date,
        short_time(entry.clock_in),
        clock_out,
        breaks,
        net,
        flag,
    ]
}

fn render_edit(draft: &CorrectionDraft, out: &mut String) {
    out.push_str(&bold("Request a correction"));
    out.push_str("\n\n");

    let rows = [
        ("in-date", &draft.clock_in_date),
        ("in-time", &draft.clock_in_time),
        ("out-date", &draft.clock_out_date),
        ("out-time", &draft.clock_out_time),
        ("reason", &draft.reason),
    ];
    for (key, value) in rows {
        let shown = if value.is_empty() { "--" } else { value.as_str() };
        out.push_str(&format!("  {key:<9} {}\n", colorize_optional(shown)));
    }

    out.push('\n');
    out.push_str(&dim("<field> <value> to change, <field> alone to blank it  [s] submit  [x] cancel"));
    out.push('\n');
}
