// srtext/src/lib.rs
//! # srtext CLI Application
//!
//! Command-line front end for `srtext-core`: sanitize text files or pipes, resolve
//! icon indices against a game's data tables, and replay recorded announcement events.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use srtext_core::{merge_rules, MarkupConfig, MarkupEngine, ReferenceTables};

/// Built-in rules, merged with an optional user rule file, minus any disabled rules.
pub fn build_config(config_path: Option<&Path>, disabled: &[String]) -> Result<MarkupConfig> {
    let defaults = MarkupConfig::load_default_rules()?;
    let user = match config_path {
        Some(path) => Some(
            MarkupConfig::load_from_file(path)
                .with_context(|| format!("Failed to load rule file {}", path.display()))?,
        ),
        None => None,
    };

    let mut config = merge_rules(defaults, user);
    if !disabled.is_empty() {
        debug!("Disabling rules: {:?}", disabled);
        config.disable_rules(disabled);
    }
    Ok(config)
}

pub fn build_engine(config_path: Option<&Path>, disabled: &[String]) -> Result<MarkupEngine> {
    MarkupEngine::new(build_config(config_path, disabled)?)
}

pub fn load_tables(data_dir: Option<&Path>) -> Result<Option<ReferenceTables>> {
    data_dir.map(ReferenceTables::load_from_dir).transpose()
}
