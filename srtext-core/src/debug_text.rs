//! Helpers for logging game text at debug level.
//!
//! Dialogue can contain story spoilers, so debug output shows a short prefix of each
//! text unless `SRTEXT_DEBUG_FULL_TEXT=true` is set.

use lazy_static::lazy_static;

const PREVIEW_CHARS: usize = 24;

lazy_static! {
    /// Whether full texts may appear in debug logs. Read once per process.
    static ref FULL_TEXT_DEBUG_ALLOWED: bool = {
        std::env::var("SRTEXT_DEBUG_FULL_TEXT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Shortens `text` to a preview with its total length.
pub fn preview_text(text: &str) -> String {
    let total = text.chars().count();
    if total <= PREVIEW_CHARS {
        text.to_string()
    } else {
        let head: String = text.chars().take(PREVIEW_CHARS).collect();
        format!("{}... [{} chars]", head, total)
    }
}

/// The form of `text` that may be written to debug logs.
pub fn loggable_text(text: &str) -> String {
    if *FULL_TEXT_DEBUG_ALLOWED {
        text.to_string()
    } else {
        preview_text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_keeps_short_text() {
        assert_eq!(preview_text("Hello there"), "Hello there");
    }

    #[test]
    fn test_preview_truncates_on_char_boundaries() {
        let text = "é".repeat(30);
        let preview = preview_text(&text);
        assert!(preview.starts_with(&"é".repeat(24)));
        assert!(preview.ends_with("[30 chars]"));
    }
}
