//! One-line status messages for the non-interactive commands.
//! Errors and warnings go to stderr so stdout stays parseable.

use ansi_term::{Colour, Style};
use std::fmt;

fn tag(colour: Colour, icon: &str) -> String {
    Style::new().bold().fg(colour).paint(icon).to_string()
}

pub fn info<T: fmt::Display>(msg: T) {
    println!("{} {}", tag(Colour::Blue, "ℹ"), msg);
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{} {}", tag(Colour::Green, "✔"), msg);
}

pub fn warning<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", tag(Colour::Yellow, "⚠"), msg);
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{} {}", tag(Colour::Red, "✖"), msg);
}

/// Section header for multi-line reports.
pub fn header<T: fmt::Display>(msg: T) {
    println!("{}", Style::new().bold().fg(Colour::Blue).paint(format!("── {msg} ──")));
}
