//! Defines the core SanitizationEngine trait.
//!
//! The `SanitizationEngine` trait is the seam between hosts (the CLI, the
//! `Announcer`, tests) and a concrete set of markup rules. Every method is total: any
//! string goes in, a string comes out.
//!
//! License: MIT OR APACHE 2.0

use crate::config::MarkupConfig;
use crate::database::ReferenceTable;
use crate::sanitizers::compiler::CompiledRules;

/// A trait that defines the core functionality of a sanitization engine.
pub trait SanitizationEngine: Send + Sync {
    /// Cleans general message text: structural hints become spaces, colour, reset,
    /// filler and font-size framing tokens are removed.
    fn sanitize_general(&self, text: &str) -> String;

    /// Cleans a speaker label. The result only holds word characters,
    /// `. , ? ! * _`, space and hyphen.
    fn sanitize_name_box(&self, text: &str) -> String;

    /// Replaces icon tokens with the resolved name plus a trailing space, or with
    /// nothing when the icon cannot be resolved.
    ///
    /// # Arguments
    /// * `text` - The raw text holding icon tokens.
    /// * `tables` - Tables to search, highest priority first.
    fn replace_icons_with_names(&self, text: &str, tables: &[ReferenceTable]) -> String;

    /// The compiled general rule set.
    fn general_rules(&self) -> &CompiledRules;

    /// The compiled name-box rule set.
    fn name_box_rules(&self) -> &CompiledRules;

    /// Returns a reference to the engine's configuration.
    fn get_config(&self) -> &MarkupConfig;
}
