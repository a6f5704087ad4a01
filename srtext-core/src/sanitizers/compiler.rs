//! compiler.rs - Compiles and caches markup rule sets.
//!
//! A `MarkupRuleSet` is turned into `CompiledRules`: literal rules keep their needle,
//! regex rules get a compiled `Regex`. Compiled sets are shared through a global cache
//! keyed by a hash of the rule set, so building several engines from the same
//! configuration compiles each set once.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{MarkupRule, MarkupRuleSet, PatternKind, MAX_PATTERN_LENGTH};
use crate::debug_text::loggable_text;
use crate::errors::SrTextError;

/// Passes that change the text without shrinking it before stabilization gives up.
/// Shrinking passes are always allowed; they are bounded by the text length.
const MAX_NON_SHRINKING_PASSES: usize = 8;

/// How a compiled rule finds its matches.
#[derive(Debug)]
pub enum Matcher {
    Literal(String),
    Pattern(Regex),
}

/// A single compiled markup rule, ready to apply.
#[derive(Debug)]
pub struct CompiledRule {
    /// The unique name of the rule within its set.
    pub name: String,
    pub matcher: Matcher,
    /// The replacement text. `$n` group references apply to regex rules.
    pub replace_with: String,
    pub first_only: bool,
}

impl CompiledRule {
    /// Applies this rule once to `text`.
    pub fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        match &self.matcher {
            Matcher::Literal(needle) => {
                if !text.contains(needle.as_str()) {
                    Cow::Borrowed(text)
                } else if self.first_only {
                    Cow::Owned(text.replacen(needle.as_str(), &self.replace_with, 1))
                } else {
                    Cow::Owned(text.replace(needle.as_str(), &self.replace_with))
                }
            }
            Matcher::Pattern(regex) => {
                if self.first_only {
                    regex.replace(text, self.replace_with.as_str())
                } else {
                    regex.replace_all(text, self.replace_with.as_str())
                }
            }
        }
    }
}

/// An ordered collection of compiled rules forming one sanitization path.
#[derive(Debug)]
pub struct CompiledRules {
    pub rules: Vec<CompiledRule>,
    /// Re-run the whole sequence until the output stops changing.
    pub stabilize: bool,
}

impl CompiledRules {
    /// Runs every rule once, in order.
    pub fn apply_once(&self, text: &str) -> String {
        let mut current = text.to_string();
        for rule in &self.rules {
            let rewritten = match rule.apply(&current) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(rewritten) => rewritten,
            };
            debug!(
                target: "srtext_core::sanitizer",
                "Rule '{}' rewrote '{}' -> '{}'",
                rule.name,
                loggable_text(&current),
                loggable_text(&rewritten)
            );
            current = rewritten;
        }
        current
    }

    /// Runs the rule sequence, repeating it until the text is stable when enabled.
    pub fn apply(&self, text: &str) -> String {
        let mut current = self.apply_once(text);
        if !self.stabilize {
            return current;
        }

        let mut non_shrinking = 0;
        loop {
            let next = self.apply_once(&current);
            if next == current {
                return current;
            }
            if next.len() >= current.len() {
                non_shrinking += 1;
                if non_shrinking >= MAX_NON_SHRINKING_PASSES {
                    warn!(
                        "Rule set did not stabilize after {} non-shrinking passes; returning last output.",
                        non_shrinking
                    );
                    return next;
                }
            }
            current = next;
        }
    }

    /// Looks up a compiled rule by name.
    pub fn rule(&self, name: &str) -> Option<&CompiledRule> {
        self.rules.iter().find(|r| r.name == name)
    }
}

lazy_static! {
    /// A thread-safe, global cache for compiled rule sets.
    /// The key is a hash of the `MarkupRuleSet`.
    static ref COMPILED_RULES_CACHE: RwLock<HashMap<u64, Arc<CompiledRules>>> = RwLock::new(HashMap::new());
}

fn hash_rule_set(rule_set: &MarkupRuleSet) -> u64 {
    let mut hasher = DefaultHasher::new();
    rule_set.hash(&mut hasher);
    hasher.finish()
}

fn compile_rule(rule: &MarkupRule, pattern: &str) -> Result<CompiledRule, SrTextError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(SrTextError::PatternLengthExceeded(
            rule.name.clone(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }

    let matcher = match rule.pattern_type {
        PatternKind::Literal => Matcher::Literal(pattern.to_string()),
        PatternKind::Regex => {
            let regex = RegexBuilder::new(pattern)
                .size_limit(10 * (1 << 20))
                .build()
                .map_err(|e| SrTextError::RuleCompilationError(rule.name.clone(), e))?;
            Matcher::Pattern(regex)
        }
    };

    Ok(CompiledRule {
        name: rule.name.clone(),
        matcher,
        replace_with: rule.replace_with.clone(),
        first_only: rule.first_only,
    })
}

/// Compiles a rule set into `CompiledRules`, preserving rule order.
/// Disabled rules are dropped; rules without a pattern are skipped with a warning.
pub fn compile_rules(rule_set: &MarkupRuleSet) -> Result<CompiledRules, SrTextError> {
    debug!("Starting compilation of {} rules.", rule_set.rules.len());

    let mut compiled_rules = Vec::with_capacity(rule_set.rules.len());
    let mut compilation_errors = Vec::new();

    for rule in &rule_set.rules {
        if !rule.is_enabled() {
            debug!("Rule '{}' is disabled, not compiling it.", rule.name);
            continue;
        }

        let Some(pattern) = rule.pattern.as_deref().filter(|p| !p.is_empty()) else {
            warn!("Skipping rule '{}' because its pattern is missing.", rule.name);
            continue;
        };

        match compile_rule(rule, pattern) {
            Ok(compiled) => {
                debug!(target: "srtext_core::sanitizer", "Rule '{}' compiled successfully.", rule.name);
                compiled_rules.push(compiled);
            }
            Err(e) => compilation_errors.push(e),
        }
    }

    if !compilation_errors.is_empty() {
        let error_message = compilation_errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(SrTextError::Fatal(format!(
            "Failed to compile {} rule(s):\n{}",
            compilation_errors.len(),
            error_message
        )));
    }

    debug!("Finished compiling rules. Total compiled: {}.", compiled_rules.len());
    Ok(CompiledRules {
        rules: compiled_rules,
        stabilize: rule_set.stabilize(),
    })
}

/// Gets compiled rules from the cache, compiling and inserting them on a miss.
pub fn get_or_compile_rules(rule_set: &MarkupRuleSet) -> Result<Arc<CompiledRules>> {
    let cache_key = hash_rule_set(rule_set);

    {
        let cache = COMPILED_RULES_CACHE
            .read()
            .map_err(|_| anyhow!("Compiled rule cache lock is poisoned"))?;
        if let Some(rules) = cache.get(&cache_key) {
            debug!("Serving compiled rules from cache for key: {}", cache_key);
            return Ok(Arc::clone(rules));
        }
    }

    debug!("Compiled rules not found in cache. Compiling now.");
    let compiled_arc = Arc::new(compile_rules(rule_set)?);

    COMPILED_RULES_CACHE
        .write()
        .map_err(|_| anyhow!("Compiled rule cache lock is poisoned"))?
        .insert(cache_key, Arc::clone(&compiled_arc));

    debug!("Successfully compiled and cached rules for key: {}", cache_key);
    Ok(compiled_arc)
}
