//! Markup sanitization for screen reader output.
//!
//! The free functions here run the built-in rule sets through a lazily built
//! `MarkupEngine`. Hosts that load their own rules build a `MarkupEngine` directly.
//!
//! * General message text: structural hints (`<WordWrap>`, `<CENTER>`, `<SIMPLE>`,
//!   `<br>`, `<BR>`) become a space; `RESETCOLOR`, filler control bytes, `{ } ^`
//!   and colour directives (`\c[n]`, including the malformed forms) are removed.
//! * Name-box text: colour directives, lone `\c` markers and `RESETCOLOR` are
//!   removed, then anything outside word characters and `. , ? ! * _ -` and space.
//! * Icons: `\I[n]` tokens become the resolved name followed by a space.

pub mod compiler;

use lazy_static::lazy_static;

use crate::database::ReferenceTable;
use crate::engine::SanitizationEngine;
use crate::engines::markup_engine::MarkupEngine;

lazy_static! {
    static ref DEFAULT_ENGINE: MarkupEngine =
        MarkupEngine::with_defaults().expect("embedded default markup rules must compile");
}

/// The engine behind the free functions in this module.
pub fn default_engine() -> &'static MarkupEngine {
    &DEFAULT_ENGINE
}

/// Sanitizes general message text with the built-in rules.
pub fn sanitize_general(text: &str) -> String {
    DEFAULT_ENGINE.sanitize_general(text)
}

/// Sanitizes name-box (speaker) text with the built-in rules.
pub fn sanitize_name_box(text: &str) -> String {
    DEFAULT_ENGINE.sanitize_name_box(text)
}

/// Replaces icon tokens with names resolved from `tables` (highest priority first).
pub fn replace_icons_with_names(text: &str, tables: &[ReferenceTable]) -> String {
    DEFAULT_ENGINE.replace_icons_with_names(text, tables)
}
