//! Concrete implementations of the `SanitizationEngine` trait.
//!
//! * `markup_engine`: ordered literal/regex rewrite passes loaded from a `MarkupConfig`.

pub mod markup_engine;
