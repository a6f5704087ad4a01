//! `srtext sanitize`: clean a file or stdin with one of the two rule sets.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;

use srtext_core::{sanitize_with_engine, HeadlessMode, ReferenceTables, SanitizationEngine};

use super::info_msg;

pub struct SanitizeOptions {
    pub input_file: Option<PathBuf>,
    pub output_path: Option<PathBuf>,
    pub mode: HeadlessMode,
    pub line_buffered: bool,
    pub quiet: bool,
}

pub fn run_sanitize(
    engine: &dyn SanitizationEngine,
    tables: Option<&ReferenceTables>,
    opts: SanitizeOptions,
) -> Result<()> {
    info!("Starting sanitize operation ({:?} mode).", opts.mode);

    let mut writer: Box<dyn Write> = match &opts.output_path {
        Some(path) => {
            if !opts.quiet {
                info_msg(format!("Writing sanitized text to file: {}", path.display()));
            }
            let file = fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Box::new(io::BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    if opts.line_buffered {
        let lines = match &opts.input_file {
            Some(path) => {
                let file = fs::File::open(path)
                    .with_context(|| format!("Failed to open input file: {}", path.display()))?;
                sanitize_lines(engine, tables, opts.mode, io::BufReader::new(file), &mut writer)?
            }
            None => sanitize_lines(engine, tables, opts.mode, io::stdin().lock(), &mut writer)?,
        };
        debug!("Sanitized {} lines.", lines);
    } else {
        let input = read_input(opts.input_file.as_ref())?;
        let sanitized = sanitize_text(engine, tables, opts.mode, &input);
        debug!(
            "Content sanitized. Original length: {}, Sanitized length: {}",
            input.len(),
            sanitized.len()
        );
        writeln!(writer, "{}", sanitized)?;
    }

    writer.flush().context("Failed to flush output")?;
    info!("Sanitize operation completed.");
    Ok(())
}

/// Sanitizes a whole document. One trailing line ending is dropped so output ends with exactly one.
pub fn sanitize_text(
    engine: &dyn SanitizationEngine,
    tables: Option<&ReferenceTables>,
    mode: HeadlessMode,
    input: &str,
) -> String {
    let input = input
        .strip_suffix("\r\n")
        .or_else(|| input.strip_suffix('\n'))
        .unwrap_or(input);
    sanitize_with_engine(engine, input, mode, tables)
}

/// Sanitizes `reader` line by line, flushing after each line. Returns the number of lines written.
pub fn sanitize_lines<R: BufRead, W: Write>(
    engine: &dyn SanitizationEngine,
    tables: Option<&ReferenceTables>,
    mode: HeadlessMode,
    reader: R,
    writer: &mut W,
) -> Result<usize> {
    let mut count = 0;
    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        writeln!(writer, "{}", sanitize_with_engine(engine, line, mode, tables))?;
        writer.flush()?;
        count += 1;
    }
    Ok(count)
}

fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            info!("Reading input from file: {}", path.display());
            fs::read_to_string(path).with_context(|| format!("Failed to read input file: {}", path.display()))
        }
        None => {
            info!("Reading input from stdin.");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read from stdin")?;
            Ok(buffer)
        }
    }
}
