//! `srtext replay`: feed recorded host events through an [`Announcer`].
//!
//! Input is JSON lines, one [`Announcement`] per line. Blank lines are skipped.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Serialize;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use srtext_core::{Announcement, AnnouncementLogEntry, Announcer};

use crate::ui::history_table;

pub struct ReplayOptions {
    pub input_file: Option<PathBuf>,
    pub json: bool,
    pub no_history: bool,
}

/// Everything a replay produced, in the shape printed by `--json`.
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub spoken: Vec<String>,
    pub history: Vec<AnnouncementLogEntry>,
}

pub fn run_replay(announcer: &mut Announcer, opts: ReplayOptions) -> Result<()> {
    info!("Starting replay.");

    let spoken = match &opts.input_file {
        Some(path) => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open event file: {}", path.display()))?;
            replay_events(announcer, io::BufReader::new(file))?
        }
        None => replay_events(announcer, io::stdin().lock())?,
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();

    if opts.json {
        let report = ReplayReport {
            spoken,
            history: announcer.log().iter().cloned().collect(),
        };
        serde_json::to_writer_pretty(&mut writer, &report).context("Failed to write JSON report")?;
        writeln!(writer)?;
    } else {
        for line in &spoken {
            writeln!(writer, "{}", line)?;
        }
        if !opts.no_history {
            history_table::print_history(announcer.log(), &mut io::stderr())?;
        }
    }

    info!("Replay completed.");
    Ok(())
}

/// Announces every event in `reader` and returns the spoken text for each, in order.
pub fn replay_events<R: BufRead>(announcer: &mut Announcer, reader: R) -> Result<Vec<String>> {
    let mut spoken = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line.with_context(|| format!("Failed to read event line {}", line_number))?;
        if line.trim().is_empty() {
            continue;
        }
        let announcement: Announcement = serde_json::from_str(&line)
            .with_context(|| format!("Invalid announcement on line {}", line_number))?;
        let text = announcer.announce(&announcement);
        debug!("Line {}: {} chars spoken.", line_number, text.len());
        spoken.push(text);
    }
    Ok(spoken)
}
