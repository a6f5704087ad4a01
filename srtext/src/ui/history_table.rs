//! Renders the announcement history as a table.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use std::io::{self, Write};

use srtext_core::AnnouncementLog;

/// Builds the history table, newest announcement first.
pub fn render_history(log: &AnnouncementLog) -> String {
    if log.is_empty() {
        return "No announcements recorded.".to_string();
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Announcement"]);

    for entry in log.iter() {
        table.add_row(vec![Cell::new(entry.inserted_at), Cell::new(&entry.text)]);
    }

    table.to_string()
}

pub fn print_history<W: Write>(log: &AnnouncementLog, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "Announcement history ({} of {}):", log.len(), log.capacity())?;
    writeln!(writer, "{}", render_history(log))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_message() {
        assert_eq!(render_history(&AnnouncementLog::new()), "No announcements recorded.");
    }

    #[test]
    fn test_rows_are_newest_first() {
        let mut log = AnnouncementLog::new();
        log.record("first line");
        log.record("second line");
        let rendered = render_history(&log);
        let second = rendered.find("second line").unwrap();
        let first = rendered.find("first line").unwrap();
        assert!(second < first);
    }
}
