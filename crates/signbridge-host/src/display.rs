//! Terminal rendering of panel status updates.

use tracing::info;

use signbridge_popup::{StatusDisplay, StatusTone, StatusUpdate};

/// Prints each status update to stdout, one line per update.
#[derive(Debug, Default)]
pub struct ConsoleDisplay;

impl ConsoleDisplay {
    pub fn format(update: &StatusUpdate) -> String {
        let marker = match update.tone {
            StatusTone::Green => "[ok]",
            StatusTone::Red => "[error]",
            StatusTone::Neutral => "[..]",
        };
        format!("{} {}", marker, update.message)
    }
}

impl StatusDisplay for ConsoleDisplay {
    fn render(&self, update: &StatusUpdate) {
        info!(tone = ?update.tone, "Status: {}", update.message);
        println!("{}", Self::format(update));
    }
}
