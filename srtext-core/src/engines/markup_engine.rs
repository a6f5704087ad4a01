// srtext-core/src/engines/markup_engine.rs
//! A `SanitizationEngine` implementation driven by ordered markup rules.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use regex::{Captures, Regex};
use std::sync::Arc;

use crate::config::{validate_config, MarkupConfig};
use crate::database::{find_name_by_icon_index, ReferenceTable};
use crate::debug_text::loggable_text;
use crate::engine::SanitizationEngine;
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRules};

#[derive(Debug)]
pub struct MarkupEngine {
    general: Arc<CompiledRules>,
    name_box: Arc<CompiledRules>,
    icon_regex: Regex,
    config: MarkupConfig,
}

impl MarkupEngine {
    pub fn new(config: MarkupConfig) -> Result<Self> {
        validate_config(&config)?;

        let general = get_or_compile_rules(&config.general)
            .context("Failed to compile general markup rules")?;
        let name_box = get_or_compile_rules(&config.name_box)
            .context("Failed to compile name box markup rules")?;
        let icon_regex = Regex::new(config.icon_pattern())
            .with_context(|| format!("Failed to compile icon pattern '{}'", config.icon_pattern()))?;

        Ok(Self {
            general,
            name_box,
            icon_regex,
            config,
        })
    }

    /// Engine over the built-in rules.
    pub fn with_defaults() -> Result<Self> {
        Self::new(MarkupConfig::load_default_rules()?)
    }

    fn resolve_icon(caps: &Captures<'_>, tables: &[ReferenceTable]) -> String {
        let icon_index = caps.get(1).and_then(|m| m.as_str().parse::<i64>().ok());
        match icon_index.and_then(|index| find_name_by_icon_index(index, tables)) {
            Some(name) => format!("{} ", name),
            None => {
                debug!("Dropping unresolved icon token '{}'.", &caps[0]);
                String::new()
            }
        }
    }
}

impl SanitizationEngine for MarkupEngine {
    fn sanitize_general(&self, text: &str) -> String {
        let cleaned = self.general.apply(text);
        debug!("General text '{}' sanitized to '{}'", loggable_text(text), loggable_text(&cleaned));
        cleaned
    }

    fn sanitize_name_box(&self, text: &str) -> String {
        let cleaned = self.name_box.apply(text);
        debug!("Name box '{}' sanitized to '{}'", loggable_text(text), loggable_text(&cleaned));
        cleaned
    }

    fn replace_icons_with_names(&self, text: &str, tables: &[ReferenceTable]) -> String {
        self.icon_regex
            .replace_all(text, |caps: &Captures<'_>| Self::resolve_icon(caps, tables))
            .into_owned()
    }

    fn general_rules(&self) -> &CompiledRules {
        &self.general
    }

    fn name_box_rules(&self) -> &CompiledRules {
        &self.name_box
    }

    fn get_config(&self) -> &MarkupConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MarkupRule, MarkupRuleSet, PatternKind};
    use crate::database::{DatabaseEntry, DatabaseKind};

    fn states_with(icon_index: i64, name: &str) -> Vec<ReferenceTable> {
        vec![ReferenceTable::new(
            DatabaseKind::States,
            vec![Some(DatabaseEntry::with_icon(icon_index, name))],
        )]
    }

    #[test]
    fn test_icon_replaced_with_name_and_space() {
        let engine = MarkupEngine::with_defaults().unwrap();
        let out = engine.replace_icons_with_names(r"Causes \I[1] for 3 turns.", &states_with(1, "blindness"));
        assert_eq!(out, "Causes blindness  for 3 turns.");
    }

    #[test]
    fn test_icon_variants_and_unresolved() {
        let engine = MarkupEngine::with_defaults().unwrap();
        let tables = states_with(12, "Regen");
        assert_eq!(engine.replace_icons_with_names(r"\\i[12]x", &tables), "Regen x");
        assert_eq!(engine.replace_icons_with_names(r"a\I[99]b", &tables), "ab");
        assert_eq!(engine.replace_icons_with_names(r"\I[99999999999999999999]", &tables), "");
    }

    #[test]
    fn test_custom_rules_are_used() {
        let config = MarkupConfig {
            general: MarkupRuleSet {
                stabilize: None,
                rules: vec![MarkupRule {
                    name: "shout".to_string(),
                    pattern_type: PatternKind::Literal,
                    pattern: Some("<SHOUT>".to_string()),
                    replace_with: String::new(),
                    ..Default::default()
                }],
            },
            ..Default::default()
        };
        let engine = MarkupEngine::new(config).unwrap();
        assert_eq!(engine.sanitize_general("<SHOUT>Hey<br>"), "Hey<br>");
        assert_eq!(engine.general_rules().rules.len(), 1);
    }
}
