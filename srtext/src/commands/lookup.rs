//! `srtext lookup`: which database entry does an icon index belong to?

use anyhow::{bail, Context, Result};
use log::debug;
use std::io::Write;
use std::path::Path;

use srtext_core::{DatabaseKind, ReferenceTables};

pub fn run_lookup<W: Write>(icon_index: i64, data_dir: &Path, writer: &mut W) -> Result<()> {
    let tables = ReferenceTables::load_from_dir(data_dir)
        .with_context(|| format!("Failed to load data tables from {}", data_dir.display()))?;

    match resolve(icon_index, &tables) {
        Some((kind, name)) => {
            debug!("Icon {} resolved in the {} table.", icon_index, kind);
            writeln!(writer, "{}", name)?;
            Ok(())
        }
        None => bail!("No named entry uses icon {}", icon_index),
    }
}

/// Like [`ReferenceTables::find_name_by_icon_index`], also reporting which table answered.
pub fn resolve(icon_index: i64, tables: &ReferenceTables) -> Option<(DatabaseKind, &str)> {
    let name = tables.find_name_by_icon_index(icon_index)?;
    let kind = tables
        .icon_tables()
        .iter()
        .find(|table| table.find_by_icon_index(icon_index).is_some())
        .map(|table| table.kind)?;
    Some((kind, name))
}
