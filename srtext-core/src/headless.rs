// File: srtext-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot sanitization without building an `Announcer`.

use anyhow::Result;

use crate::config::MarkupConfig;
use crate::database::ReferenceTables;
use crate::engine::SanitizationEngine;
use crate::engines::markup_engine::MarkupEngine;

/// Which sanitization path to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadlessMode {
    General,
    NameBox,
}

/// Sanitizes `content` in a single call.
///
/// When `tables` is given, icon tokens are replaced with names first, so the names
/// pass through the same cleaning as the rest of the text.
///
/// # Arguments
///
/// * `config` - The merged markup configuration (defaults + optional user overrides).
/// * `content` - The raw text.
/// * `mode` - General message text or name-box text.
/// * `tables` - Optional reference tables for icon resolution.
pub fn headless_sanitize_string(
    config: MarkupConfig,
    content: &str,
    mode: HeadlessMode,
    tables: Option<&ReferenceTables>,
) -> Result<String> {
    let engine = MarkupEngine::new(config)?;
    Ok(sanitize_with_engine(&engine, content, mode, tables))
}

/// Same as [`headless_sanitize_string`] with an engine the caller already built.
pub fn sanitize_with_engine(
    engine: &dyn SanitizationEngine,
    content: &str,
    mode: HeadlessMode,
    tables: Option<&ReferenceTables>,
) -> String {
    let with_icons = match tables {
        Some(tables) => engine.replace_icons_with_names(content, tables.icon_tables()),
        None => content.to_string(),
    };

    match mode {
        HeadlessMode::General => engine.sanitize_general(&with_icons),
        HeadlessMode::NameBox => engine.sanitize_name_box(&with_icons),
    }
}
