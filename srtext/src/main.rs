// srtext/src/main.rs
//! srtext entry point.
//!
//! Parses the command line, sets up logging, builds the markup engine and dispatches.

use anyhow::Result;
use clap::Parser;
use std::path::Path;

use srtext::cli::{Cli, Commands};
use srtext::commands::{error_msg, lookup, replay, sanitize, warn_msg};
use srtext::{build_engine, load_tables, logger};
use srtext_core::{Announcer, ReferenceTables};

fn main() {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(log::LevelFilter::Off)
    } else if args.debug {
        Some(log::LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    if let Err(e) = run(args) {
        error_msg(format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(args: Cli) -> Result<()> {
    match args.command {
        Commands::Sanitize(cmd) => {
            let engine = build_engine(args.config.as_deref(), &args.disable)?;
            let tables = load_tables_noting_empty(cmd.data_dir.as_deref(), args.quiet)?;
            sanitize::run_sanitize(
                &engine,
                tables.as_ref(),
                sanitize::SanitizeOptions {
                    input_file: cmd.input_file,
                    output_path: cmd.output,
                    mode: cmd.mode.into(),
                    line_buffered: cmd.line_buffered,
                    quiet: args.quiet,
                },
            )
        }
        Commands::Lookup(cmd) => {
            lookup::run_lookup(cmd.icon_index, &cmd.data_dir, &mut std::io::stdout().lock())
        }
        Commands::Replay(cmd) => {
            let engine = build_engine(args.config.as_deref(), &args.disable)?;
            let tables = load_tables_noting_empty(cmd.data_dir.as_deref(), args.quiet)?.unwrap_or_default();
            let mut announcer = Announcer::new(Box::new(engine), tables);
            replay::run_replay(
                &mut announcer,
                replay::ReplayOptions {
                    input_file: cmd.input_file,
                    json: cmd.json,
                    no_history: cmd.no_history,
                },
            )
        }
    }
}

fn load_tables_noting_empty(data_dir: Option<&Path>, quiet: bool) -> Result<Option<ReferenceTables>> {
    let tables = load_tables(data_dir)?;
    if let (Some(dir), Some(loaded)) = (data_dir, tables.as_ref()) {
        let nothing_loaded = loaded.icon_tables().iter().all(|table| table.entries.is_empty());
        if nothing_loaded && !quiet {
            warn_msg(format!(
                "No icon tables found in {}; icon references will be dropped.",
                dir.display()
            ));
        }
    }
    Ok(tables)
}
