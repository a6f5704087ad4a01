//! Turns host events into spoken text and keeps the history.
//!
//! The host decides *when* something should be said and hands the `Announcer` an
//! [`Announcement`] describing *what* changed (a message page, a highlighted skill,
//! an option value, ...). The announcer composes the sentence, runs it through the
//! general sanitizer, remembers it as the current live text and records it.

use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::announcement_log::AnnouncementLog;
use crate::database::ReferenceTables;
use crate::debug_text::loggable_text;
use crate::engine::SanitizationEngine;
use crate::engines::markup_engine::MarkupEngine;

/// Who is talking in a message window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Speaker {
    /// Raw name-box label, still carrying markup.
    NameBox(String),
    /// Face graphic name; resolved to an actor name when possible.
    Face(String),
}

/// Something on screen that should be read out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Announcement {
    /// Plain text: battle log lines, command names, scrolling text.
    Text { text: String },
    /// A message window page.
    Message {
        body: String,
        #[serde(default)]
        speaker: Option<Speaker>,
    },
    /// A highlighted skill.
    Skill {
        name: String,
        #[serde(default)]
        description: Option<String>,
    },
    /// A highlighted inventory item.
    Item {
        name: String,
        #[serde(default)]
        count: Option<u32>,
        #[serde(default)]
        description: Option<String>,
    },
    /// A highlighted option and its current value.
    Setting { label: String, status: String },
    /// A highlighted actor or enemy in battle.
    Battler { name: String, hp: i64, max_hp: i64 },
}

impl Announcement {
    pub fn text(text: impl Into<String>) -> Self {
        Announcement::Text { text: text.into() }
    }
}

pub struct Announcer {
    engine: Box<dyn SanitizationEngine>,
    tables: ReferenceTables,
    log: AnnouncementLog,
    current: Option<String>,
}

impl Announcer {
    /// The history size comes from the engine's configuration.
    pub fn new(engine: Box<dyn SanitizationEngine>, tables: ReferenceTables) -> Self {
        let log = AnnouncementLog::with_capacity(engine.get_config().log_capacity());
        Self {
            engine,
            tables,
            log,
            current: None,
        }
    }

    /// Built-in rules and empty tables.
    pub fn with_defaults() -> Result<Self> {
        Ok(Self::new(Box::new(MarkupEngine::with_defaults()?), ReferenceTables::new()))
    }

    /// Builds the unsanitized sentence for `announcement`.
    pub fn compose(&self, announcement: &Announcement) -> String {
        match announcement {
            Announcement::Text { text } => text.clone(),
            Announcement::Message { body, speaker } => match self.speaker_name(speaker.as_ref()) {
                Some(name) => format!("{}: {}", name, body),
                None => body.clone(),
            },
            Announcement::Skill { name, description } => match non_empty(description.as_deref()) {
                Some(description) => format!("{}: {}", name, self.with_icon_names(description)),
                None => name.clone(),
            },
            Announcement::Item { name, count, description } => {
                let mut sentence = name.clone();
                if let Some(count) = count {
                    sentence.push_str(&format!(": {}", count));
                }
                if let Some(description) = non_empty(description.as_deref()) {
                    sentence.push_str(". ");
                    sentence.push_str(&self.with_icon_names(description));
                }
                sentence
            }
            Announcement::Setting { label, status } => format!("{}: {}", label, status),
            Announcement::Battler { name, hp, max_hp } => format!("{}: {} / {}", name, hp, max_hp),
        }
    }

    /// Composes, sanitizes and records `announcement`, returning the spoken text.
    ///
    /// Text that sanitizes to nothing becomes the current text but is not logged.
    pub fn announce(&mut self, announcement: &Announcement) -> String {
        let raw = self.compose(announcement);
        let spoken = self.engine.sanitize_general(&raw);

        if spoken.trim().is_empty() {
            debug!("Announcement '{}' is empty after sanitizing; not logging it.", loggable_text(&raw));
        } else {
            self.log.record(spoken.clone());
        }

        self.current = Some(spoken.clone());
        spoken
    }

    /// Shorthand for announcing plain text.
    pub fn announce_text(&mut self, raw: &str) -> String {
        self.announce(&Announcement::text(raw))
    }

    /// The text most recently handed to the screen reader.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn log(&self) -> &AnnouncementLog {
        &self.log
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn engine(&self) -> &dyn SanitizationEngine {
        self.engine.as_ref()
    }

    fn speaker_name(&self, speaker: Option<&Speaker>) -> Option<String> {
        match speaker? {
            Speaker::NameBox(raw) => {
                let name = self.engine.sanitize_name_box(raw);
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            }
            Speaker::Face(face_name) => {
                let face_name = non_empty(Some(face_name.as_str()))?;
                Some(
                    self.tables
                        .find_actor_name_by_face(face_name)
                        .unwrap_or(face_name)
                        .to_string(),
                )
            }
        }
    }

    fn with_icon_names(&self, text: &str) -> String {
        self.engine.replace_icons_with_names(text, self.tables.icon_tables())
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
