//! Message formatting for terminal output.

mod constants;

pub use constants::*;

use color_print::cformat;

pub fn success_message(msg: impl AsRef<str>) -> String {
    let msg = msg.as_ref();
    cformat!("{SUCCESS_EMOJI} <green>{msg}</>")
}

pub fn progress_message(msg: impl AsRef<str>) -> String {
    let msg = msg.as_ref();
    cformat!("{PROGRESS_EMOJI} <cyan>{msg}</>")
}

pub fn warning_message(msg: impl AsRef<str>) -> String {
    let msg = msg.as_ref();
    cformat!("{WARNING_EMOJI} <yellow>{msg}</>")
}

pub fn error_message(msg: impl AsRef<str>) -> String {
    let msg = msg.as_ref();
    cformat!("{ERROR_EMOJI} <red>{msg}</>")
}

pub fn hint_message(msg: impl AsRef<str>) -> String {
    let msg = msg.as_ref();
    cformat!("{HINT_EMOJI} <dim>{msg}</>")
}

/// Indent each line behind a shaded gutter column.
pub fn format_with_gutter(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("{GUTTER} {GUTTER:#} {line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
