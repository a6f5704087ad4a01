//! Configuration management for `srtext-core`.
//!
//! This module defines the data structures for markup rules and the two rule sets the
//! sanitizer runs (general message text and name-box text). It handles YAML
//! deserialization, provides the embedded default rules, and merges user overrides on
//! top of them.
//!
//! Rule order is part of the contract: a rule set is applied top to bottom, so merging
//! keeps the default order and only appends genuinely new rules.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Maximum allowed length for a rule pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Number of entries the announcement history keeps when nothing else is configured.
pub const DEFAULT_LOG_CAPACITY: usize = 20;

/// Icon reference token. Capture group 1 is the icon index.
pub const DEFAULT_ICON_PATTERN: &str = r"\\{1,2}[iI]\[([0-9]+)\]";

/// How a rule's `pattern` is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    /// Plain substring match.
    Literal,
    /// Regular expression (Rust `regex` syntax).
    #[default]
    Regex,
}

/// A single rewrite pass over the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct MarkupRule {
    /// Unique identifier within its rule set (e.g. "color_directive").
    pub name: String,
    pub description: Option<String>,
    pub pattern_type: PatternKind,
    pub pattern: Option<String>,
    /// Replacement text. Regex rules may reference capture groups as `$1`.
    pub replace_with: String,
    /// Replace only the first occurrence. Only observable when the set is not stabilized.
    pub first_only: bool,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for MarkupRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern_type: PatternKind::Regex,
            pattern: None,
            replace_with: String::new(),
            first_only: false,
            enabled: None,
        }
    }
}

impl MarkupRule {
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// An ordered list of rules applied as one sanitization path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MarkupRuleSet {
    /// Re-run the whole set until the text stops changing. `None` means yes.
    pub stabilize: Option<bool>,
    pub rules: Vec<MarkupRule>,
}

impl MarkupRuleSet {
    pub fn stabilize(&self) -> bool {
        self.stabilize.unwrap_or(true)
    }
}

/// Top-level configuration: both sanitization paths, the icon token and the history size.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct MarkupConfig {
    pub general: MarkupRuleSet,
    pub name_box: MarkupRuleSet,
    pub icon_pattern: Option<String>,
    pub log_capacity: Option<usize>,
}

impl MarkupConfig {
    /// Loads markup rules from a YAML file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom markup rules from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: MarkupConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        validate_config(&config)?;
        info!(
            "Loaded {} general and {} name box rules from file {}.",
            config.general.rules.len(),
            config.name_box.rules.len(),
            path.display()
        );

        Ok(config)
    }

    /// Loads the built-in rules from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default markup rules from embedded string...");
        let default_yaml = include_str!("../config/default_markup.yaml");
        let config: MarkupConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default markup rules")?;

        debug!(
            "Loaded {} general and {} name box default rules.",
            config.general.rules.len(),
            config.name_box.rules.len()
        );
        Ok(config)
    }

    pub fn icon_pattern(&self) -> &str {
        self.icon_pattern.as_deref().unwrap_or(DEFAULT_ICON_PATTERN)
    }

    /// History size, never below one entry.
    pub fn log_capacity(&self) -> usize {
        self.log_capacity.unwrap_or(DEFAULT_LOG_CAPACITY).max(1)
    }

    /// Disables the named rules in both sets.
    pub fn disable_rules(&mut self, names: &[String]) {
        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let mut seen = HashSet::new();

        for rule in self.general.rules.iter_mut().chain(self.name_box.rules.iter_mut()) {
            if wanted.contains(rule.name.as_str()) {
                rule.enabled = Some(false);
                seen.insert(rule.name.clone());
            }
        }

        for name in wanted.iter().filter(|n| !seen.contains(**n)) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", name);
        }
    }
}

/// Merges a user configuration over the defaults.
///
/// A user rule replaces the default rule with the same name in place; unknown names are
/// appended to the end of their set. Scalar settings override when present.
pub fn merge_rules(default_config: MarkupConfig, user_config: Option<MarkupConfig>) -> MarkupConfig {
    let Some(user_cfg) = user_config else {
        debug!("merge_rules called without user config. Keeping defaults.");
        return default_config;
    };

    debug!(
        "Merging {} general and {} name box user rules.",
        user_cfg.general.rules.len(),
        user_cfg.name_box.rules.len()
    );

    MarkupConfig {
        general: merge_rule_set(default_config.general, user_cfg.general),
        name_box: merge_rule_set(default_config.name_box, user_cfg.name_box),
        icon_pattern: user_cfg.icon_pattern.or(default_config.icon_pattern),
        log_capacity: user_cfg.log_capacity.or(default_config.log_capacity),
    }
}

fn merge_rule_set(default_set: MarkupRuleSet, user_set: MarkupRuleSet) -> MarkupRuleSet {
    let mut rules = default_set.rules;
    for user_rule in user_set.rules {
        match rules.iter_mut().find(|r| r.name == user_rule.name) {
            Some(existing) => {
                debug!("Overriding rule '{}' with user definition.", user_rule.name);
                *existing = user_rule;
            }
            None => {
                debug!("Appending new user rule '{}'.", user_rule.name);
                rules.push(user_rule);
            }
        }
    }

    MarkupRuleSet {
        stabilize: user_set.stabilize.or(default_set.stabilize),
        rules,
    }
}

/// Validates rule integrity for both rule sets and the icon pattern.
pub fn validate_config(config: &MarkupConfig) -> Result<()> {
    let mut errors = Vec::new();
    validate_rule_set("general", &config.general.rules, &mut errors);
    validate_rule_set("name_box", &config.name_box.rules, &mut errors);

    if let Some(icon_pattern) = &config.icon_pattern {
        match Regex::new(icon_pattern) {
            Ok(re) if re.captures_len() < 2 => {
                errors.push("`icon_pattern` must contain a capture group for the icon index.".to_string());
            }
            Ok(_) => {}
            Err(e) => errors.push(format!("`icon_pattern` is not a valid regex: {}", e)),
        }
    }

    if config.log_capacity == Some(0) {
        errors.push("`log_capacity` must be greater than 0.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Rule validation failed:\n{}", errors.join("\n")))
    }
}

fn validate_rule_set(set_name: &str, rules: &[MarkupRule], errors: &mut Vec<String>) {
    let mut rule_names = HashSet::new();

    for rule in rules {
        if rule.name.is_empty() {
            errors.push(format!("A rule in `{}` has an empty `name` field.", set_name));
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found in `{}`: '{}'.", set_name, rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        if rule.pattern_type == PatternKind::Regex {
            if let Err(e) = Regex::new(pattern) {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
            }
        }
    }
}
