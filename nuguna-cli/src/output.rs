//! Output formatting utilities
//!
//! Results go to stdout; notices go to stderr so piped output stays clean.

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use nuguna_core::services::APOLOGY;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{}", msg.yellow());
}

/// Print a pipeline answer; the apology is highlighted as a failure
pub fn answer(text: &str) {
    if text == APOLOGY {
        println!("{}", text.red());
    } else {
        println!("{}", text);
    }
}

/// Print the handler status line
pub fn status_code(code: u16) {
    let line = format!("HTTP {}", code);
    match code {
        200..=299 => eprintln!("{}", line.green()),
        400..=499 => eprintln!("{}", line.yellow()),
        _ => eprintln!("{}", line.red()),
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}
