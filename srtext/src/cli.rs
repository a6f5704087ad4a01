//! This file defines the command-line interface (CLI) for the srtext application,
//! including all available commands and their arguments.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use srtext_core::HeadlessMode;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "srtext",
    version = env!("CARGO_PKG_VERSION"),
    about = "Clean game-engine rich text for screen readers",
    long_about = "srtext strips colour codes, font framing, structural hints and other engine markup from game text, resolves icon references to item and skill names, and keeps a short history of announcements. Use it to check what a screen reader would say for a given line of game text.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable all logging output.
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to a custom markup rule file (YAML), merged over the built-in rules.
    #[arg(long = "config", value_name = "FILE", global = true, help = "Path to a custom markup rule file (YAML).")]
    pub config: Option<PathBuf>,

    /// Rule names to disable (comma-separated).
    #[arg(long, short = 'x', value_delimiter = ',', global = true, help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `srtext` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sanitizes an input file or stdin.
    #[command(about = "Sanitizes an input file or stdin into screen reader text.")]
    Sanitize(SanitizeCommand),

    /// Resolves an icon index to the name of the entry that uses it.
    #[command(about = "Resolves an icon index against a game's data directory.")]
    Lookup(LookupCommand),

    /// Replays a stream of announcement events and prints what would be spoken.
    #[command(about = "Replays JSON-lines announcement events and prints the spoken text and history.")]
    Replay(ReplayCommand),
}

/// Arguments for the `sanitize` command.
#[derive(Parser, Debug)]
pub struct SanitizeCommand {
    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Write sanitized output to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,

    /// Which rule set to apply.
    #[arg(long, short = 'm', value_enum, default_value = "general", help = "Sanitize as general message text or as a name box label.")]
    pub mode: SanitizeMode,

    /// Game data directory used to resolve icon references.
    #[arg(long = "data-dir", value_name = "DIR", help = "Resolve icon references using the JSON tables in this directory.")]
    pub data_dir: Option<PathBuf>,

    /// Process input line by line (useful for streaming data from pipes).
    #[arg(long = "line-buffered", help = "Process input line by line (useful for streaming data from pipes).")]
    pub line_buffered: bool,
}

/// Arguments for the `lookup` command.
#[derive(Parser, Debug)]
pub struct LookupCommand {
    /// The icon index to resolve.
    #[arg(value_name = "ICON_INDEX", help = "The icon index to resolve.")]
    pub icon_index: i64,

    /// Game data directory holding Items.json, Weapons.json, etc.
    #[arg(long = "data-dir", value_name = "DIR", help = "Directory holding the game's JSON data tables.")]
    pub data_dir: PathBuf,
}

/// Arguments for the `replay` command.
#[derive(Parser, Debug)]
pub struct ReplayCommand {
    /// Path to a JSON-lines event file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read events from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Game data directory used for icon and face lookups.
    #[arg(long = "data-dir", value_name = "DIR", help = "Directory holding the game's JSON data tables.")]
    pub data_dir: Option<PathBuf>,

    /// Emit a single JSON document instead of text.
    #[arg(long = "json", help = "Print spoken lines and the final history as JSON on stdout.")]
    pub json: bool,

    /// Do not print the history table.
    #[arg(long = "no-history", conflicts_with = "json", help = "Do not print the announcement history.")]
    pub no_history: bool,
}

/// Rule set selector for the `sanitize` command.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SanitizeMode {
    /// Message, battle log and description text.
    General,
    /// Speaker labels.
    NameBox,
}

impl From<SanitizeMode> for HeadlessMode {
    fn from(mode: SanitizeMode) -> Self {
        match mode {
            SanitizeMode::General => HeadlessMode::General,
            SanitizeMode::NameBox => HeadlessMode::NameBox,
        }
    }
}
