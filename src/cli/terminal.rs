//! Terminal capabilities and the colours used for due statuses
//!
//! Overdue tasks are bold red, anything else needing attention is amber,
//! tasks within limits are green and tasks without a usable due rule are
//! dimmed. Colour is dropped when stdout does not support it.

use maintrack::DueStatus;
use owo_colors::{OwoColorize, colors::css};

/// Columns the due table needs before it falls back to stacked output.
const TABLE_WIDTH: u16 = 80;

fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Whether the terminal is too narrow for tabular output.
///
/// Unknown widths (e.g. output piped to a file) count as wide.
pub fn is_narrow() -> bool {
    terminal_size::terminal_size().is_some_and(|(width, _)| width.0 < TABLE_WIDTH)
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Colouring for status text.
pub trait Colorize {
    /// Green: within limits, or a successful change.
    fn success(&self) -> String;
    /// Amber: due soon, missing data or a skipped record.
    fn warning(&self) -> String;
    /// Bold red: overdue.
    fn error(&self) -> String;
    /// Dimmed: secondary detail and tasks without a due rule.
    fn dim(&self) -> String;

    /// Colour according to a due status.
    fn status(&self, status: DueStatus) -> String {
        match status {
            DueStatus::Overdue => self.error(),
            DueStatus::MissingComponentTime | DueStatus::DueSoon => self.warning(),
            DueStatus::Ok => self.success(),
            DueStatus::CheckDueInfo => self.dim(),
        }
    }
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn error(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Red>().bold().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}
