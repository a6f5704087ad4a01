//! Bounded history of spoken announcements.
//!
//! The log keeps the most recent announcements, newest first. Recording the same text
//! twice in a row is a no-op: several engine notifications tend to fire for a single
//! on-screen change, and the history should show it once. Only the most recent text is
//! compared, so a message that comes back later is logged again.

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::config::DEFAULT_LOG_CAPACITY;
use crate::debug_text::loggable_text;

/// Capacity of a log built with [`AnnouncementLog::new`].
pub const MAX_LOG_ENTRIES: usize = DEFAULT_LOG_CAPACITY;

/// One recorded announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementLogEntry {
    pub text: String,
    /// Position in the recording sequence, starting at 0. Dedup hits do not consume one.
    pub inserted_at: u64,
}

#[derive(Debug, Clone)]
pub struct AnnouncementLog {
    /// Front is the newest entry.
    entries: VecDeque<AnnouncementLogEntry>,
    capacity: usize,
    last_recorded: Option<String>,
    next_ordinal: u64,
}

impl Default for AnnouncementLog {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnouncementLog {
    /// An empty log holding up to [`MAX_LOG_ENTRIES`] entries.
    pub fn new() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }

    /// An empty log holding up to `capacity` entries (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            last_recorded: None,
            next_ordinal: 0,
        }
    }

    /// Records `text` at the head of the log.
    ///
    /// Returns `false` when `text` equals the last recorded text and nothing changed.
    pub fn record(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if self.last_recorded.as_deref() == Some(text.as_str()) {
            debug!("Skipping repeated announcement '{}'.", loggable_text(&text));
            return false;
        }

        if self.entries.len() >= self.capacity {
            if let Some(evicted) = self.entries.pop_back() {
                debug!(
                    "Announcement log full ({}); evicting #{} '{}'.",
                    self.capacity,
                    evicted.inserted_at,
                    loggable_text(&evicted.text)
                );
            }
        }

        self.entries.push_front(AnnouncementLogEntry {
            text: text.clone(),
            inserted_at: self.next_ordinal,
        });
        self.next_ordinal += 1;
        self.last_recorded = Some(text);
        true
    }

    /// Texts currently held, newest first.
    pub fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.text.as_str()).collect()
    }

    /// Full entries, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &AnnouncementLogEntry> {
        self.entries.iter()
    }

    pub fn last_recorded(&self) -> Option<&str> {
        self.last_recorded.as_deref()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_log_is_empty() {
        let log = AnnouncementLog::new();
        assert!(log.is_empty());
        assert_eq!(log.capacity(), 20);
        assert_eq!(log.last_recorded(), None);
    }

    #[test]
    fn test_consecutive_duplicates_collapse() {
        let mut log = AnnouncementLog::new();
        assert!(log.record("A"));
        assert!(!log.record("A"));
        assert!(log.record("B"));
        assert_eq!(log.entries(), vec!["B", "A"]);
    }

    #[test]
    fn test_non_consecutive_repeat_is_logged_again() {
        let mut log = AnnouncementLog::new();
        for text in ["A", "B", "A"] {
            log.record(text);
        }
        assert_eq!(log.entries(), vec!["A", "B", "A"]);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut log = AnnouncementLog::new();
        log.record("Hello");
        assert!(log.record("hello"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_eviction_drops_oldest() {
        let mut log = AnnouncementLog::new();
        for page in 0..22 {
            log.record(format!("This is page {}", page));
        }
        assert_eq!(log.len(), 20);
        let entries = log.entries();
        assert_eq!(entries[0], "This is page 21");
        assert_eq!(entries[19], "This is page 2");
        assert!(!entries.contains(&"This is page 0"));
        assert!(!entries.contains(&"This is page 1"));
    }

    #[test]
    fn test_duplicate_at_capacity_does_not_evict() {
        let mut log = AnnouncementLog::with_capacity(2);
        log.record("one");
        log.record("two");
        assert!(!log.record("two"));
        assert_eq!(log.entries(), vec!["two", "one"]);
    }

    #[test]
    fn test_ordinals_skip_dedup_hits() {
        let mut log = AnnouncementLog::new();
        log.record("A");
        log.record("A");
        log.record("B");
        let ordinals: Vec<u64> = log.iter().map(|e| e.inserted_at).collect();
        assert_eq!(ordinals, vec![1, 0]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut log = AnnouncementLog::with_capacity(0);
        log.record("first");
        log.record("second");
        assert_eq!(log.entries(), vec!["second"]);
    }
}
