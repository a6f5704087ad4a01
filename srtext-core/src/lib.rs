// srtext-core/src/lib.rs
//! # srtext Core Library
//!
//! `srtext-core` turns game-engine rich text into plain sentences a screen reader can
//! speak, and keeps a short history of what was said. It knows the engine's markup
//! vocabulary (colour directives, `RESETCOLOR`, font-size framing, structural hints,
//! icon references and the malformed variants seen in the wild) and nothing about
//! rendering, input or audio.
//!
//! ## Modules
//!
//! * `config`: Defines `MarkupRule`s and `MarkupConfig`, the embedded defaults, loading and merging.
//! * `sanitizers`: Rule compilation (`compiler`) and the default-rule entry points.
//! * `engine`: Defines the `SanitizationEngine` trait.
//! * `engines`: Contains the concrete `MarkupEngine`.
//! * `database`: Reference tables and the reverse icon-to-name lookup.
//! * `announcement_log`: The bounded, deduplicating announcement history.
//! * `announcer`: Composes host events into sentences and records them.
//! * `headless`: One-shot helpers.
//! * `errors`: The `SrTextError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use srtext_core::{sanitize_general, sanitize_name_box, AnnouncementLog};
//!
//! let spoken = sanitize_general("In A.D. 2101<br>War was beginning.");
//! assert_eq!(spoken, "In A.D. 2101 War was beginning.");
//!
//! assert_eq!(sanitize_name_box(r"\c[2]Lara Croft\c"), "Lara Croft");
//!
//! let mut log = AnnouncementLog::new();
//! log.record(spoken.clone());
//! log.record(spoken);
//! assert_eq!(log.len(), 1);
//! ```
//!
//! ## Error Handling
//!
//! Text operations never fail. Loading rule files, compiling rules and reading data
//! tables return `anyhow::Result`, with `SrTextError` for the specific cases.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod announcement_log;
pub mod announcer;
pub mod config;
pub mod database;
pub mod debug_text;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod sanitizers;

/// Re-exports the configuration types and functions for managing markup rules.
pub use config::{
    merge_rules,
    validate_config,
    MarkupConfig,
    MarkupRule,
    MarkupRuleSet,
    PatternKind,
    DEFAULT_ICON_PATTERN,
    DEFAULT_LOG_CAPACITY,
    MAX_PATTERN_LENGTH,
};

pub use errors::SrTextError;

pub use engine::SanitizationEngine;
pub use engines::markup_engine::MarkupEngine;

/// Re-exports the default-rule sanitization entry points.
pub use sanitizers::{default_engine, replace_icons_with_names, sanitize_general, sanitize_name_box};
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};

pub use database::{find_name_by_icon_index, DatabaseEntry, DatabaseKind, ReferenceTable, ReferenceTables};

pub use announcement_log::{AnnouncementLog, AnnouncementLogEntry, MAX_LOG_ENTRIES};
pub use announcer::{Announcement, Announcer, Speaker};

pub use headless::{headless_sanitize_string, sanitize_with_engine, HeadlessMode};
