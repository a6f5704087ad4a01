//! Reference tables and the reverse icon lookup.
//!
//! Game text often shows an icon (`\I[64]`) with no other hint about what it stands
//! for. The only way to say something useful is to find which database entry uses
//! that icon. Tables are searched in a fixed priority order (items, weapons, armors,
//! skills, states) and entries in their stored order, so ties resolve the same way
//! every time.
//!
//! Engine data files are JSON arrays that usually start with `null` and may have
//! further `null` holes; those slots are kept as `None` and skipped during lookups.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::errors::SrTextError;

/// The kinds of database the engine ships.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatabaseKind {
    Items,
    Weapons,
    Armors,
    Skills,
    States,
    /// Not part of icon resolution; used for speaker face lookups.
    Actors,
}

impl DatabaseKind {
    /// Icon lookup order, highest priority first.
    pub const ICON_PRIORITY: [DatabaseKind; 5] = [
        DatabaseKind::Items,
        DatabaseKind::Weapons,
        DatabaseKind::Armors,
        DatabaseKind::Skills,
        DatabaseKind::States,
    ];

    /// File name of this database inside an engine `data/` directory.
    pub fn file_name(self) -> &'static str {
        match self {
            DatabaseKind::Items => "Items.json",
            DatabaseKind::Weapons => "Weapons.json",
            DatabaseKind::Armors => "Armors.json",
            DatabaseKind::Skills => "Skills.json",
            DatabaseKind::States => "States.json",
            DatabaseKind::Actors => "Actors.json",
        }
    }
}

impl fmt::Display for DatabaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DatabaseKind::Items => "items",
            DatabaseKind::Weapons => "weapons",
            DatabaseKind::Armors => "armors",
            DatabaseKind::Skills => "skills",
            DatabaseKind::States => "states",
            DatabaseKind::Actors => "actors",
        };
        f.write_str(name)
    }
}

/// The fields of a database entry this crate cares about. Everything else in the
/// engine's JSON is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DatabaseEntry {
    pub name: Option<String>,
    pub icon_index: Option<i64>,
    pub face_name: Option<String>,
}

impl DatabaseEntry {
    pub fn with_icon(icon_index: i64, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            icon_index: Some(icon_index),
            face_name: None,
        }
    }

    pub fn with_face(face_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            icon_index: None,
            face_name: Some(face_name.into()),
        }
    }
}

/// One sparse, ordered database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTable {
    pub kind: DatabaseKind,
    pub entries: Vec<Option<DatabaseEntry>>,
}

impl ReferenceTable {
    pub fn new(kind: DatabaseKind, entries: Vec<Option<DatabaseEntry>>) -> Self {
        Self { kind, entries }
    }

    pub fn empty(kind: DatabaseKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// Parses an engine data file body.
    pub fn from_json_str(kind: DatabaseKind, json: &str) -> Result<Self, SrTextError> {
        let entries: Vec<Option<DatabaseEntry>> = serde_json::from_str(json)
            .map_err(|e| SrTextError::TableParseError(kind.file_name().to_string(), e))?;
        Ok(Self::new(kind, entries))
    }

    pub fn load_from_file<P: AsRef<Path>>(kind: DatabaseKind, path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {} table {}", kind, path.display()))?;
        let table = Self::from_json_str(kind, &text)
            .with_context(|| format!("Failed to parse {} table {}", kind, path.display()))?;
        debug!("Loaded {} {} slots from {}.", table.entries.len(), kind, path.display());
        Ok(table)
    }

    /// First present entry using `icon_index`.
    pub fn find_by_icon_index(&self, icon_index: i64) -> Option<&DatabaseEntry> {
        self.entries
            .iter()
            .flatten()
            .find(|entry| entry.icon_index == Some(icon_index))
    }

    /// First present entry using the face graphic `face_name`.
    pub fn find_by_face_name(&self, face_name: &str) -> Option<&DatabaseEntry> {
        self.entries
            .iter()
            .flatten()
            .find(|entry| entry.face_name.as_deref() == Some(face_name))
    }
}

/// Reverse icon lookup over an ordered list of tables.
///
/// The first entry (in table order, then entry order) whose icon matches decides the
/// result; if that entry has no usable name the lookup yields `None`.
pub fn find_name_by_icon_index(icon_index: i64, tables: &[ReferenceTable]) -> Option<&str> {
    let entry = tables
        .iter()
        .find_map(|table| table.find_by_icon_index(icon_index))?;
    entry.name.as_deref().filter(|name| !name.is_empty())
}

/// The full set of tables a game provides, kept in icon priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceTables {
    icon_tables: Vec<ReferenceTable>,
    actors: ReferenceTable,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self {
            icon_tables: DatabaseKind::ICON_PRIORITY
                .iter()
                .map(|kind| ReferenceTable::empty(*kind))
                .collect(),
            actors: ReferenceTable::empty(DatabaseKind::Actors),
        }
    }
}

impl ReferenceTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the table of the same kind.
    pub fn insert(&mut self, table: ReferenceTable) {
        if table.kind == DatabaseKind::Actors {
            self.actors = table;
            return;
        }
        match self.icon_tables.iter_mut().find(|t| t.kind == table.kind) {
            Some(slot) => *slot = table,
            None => {
                self.icon_tables.push(table);
                self.icon_tables.sort_by_key(|t| t.kind);
            }
        }
    }

    /// Builder form of [`ReferenceTables::insert`].
    pub fn with_table(mut self, table: ReferenceTable) -> Self {
        self.insert(table);
        self
    }

    pub fn table(&self, kind: DatabaseKind) -> Option<&ReferenceTable> {
        if kind == DatabaseKind::Actors {
            return Some(&self.actors);
        }
        self.icon_tables.iter().find(|t| t.kind == kind)
    }

    /// Icon tables in lookup order.
    pub fn icon_tables(&self) -> &[ReferenceTable] {
        &self.icon_tables
    }

    pub fn find_name_by_icon_index(&self, icon_index: i64) -> Option<&str> {
        find_name_by_icon_index(icon_index, &self.icon_tables)
    }

    /// Name of the first actor drawn with `face_name`.
    pub fn find_actor_name_by_face(&self, face_name: &str) -> Option<&str> {
        self.actors
            .find_by_face_name(face_name)
            .and_then(|actor| actor.name.as_deref())
    }

    /// Loads every known table from an engine `data/` directory.
    /// Missing files leave the table empty; unreadable or malformed files are errors.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        info!("Loading reference tables from: {}", dir.display());

        let mut tables = Self::new();
        let kinds = DatabaseKind::ICON_PRIORITY
            .iter()
            .copied()
            .chain(std::iter::once(DatabaseKind::Actors));

        for kind in kinds {
            let path = dir.join(kind.file_name());
            if !path.is_file() {
                warn!("No {} table at {}; treating it as empty.", kind, path.display());
                continue;
            }
            tables.insert(ReferenceTable::load_from_file(kind, &path)?);
        }

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(kind: DatabaseKind, entries: Vec<Option<DatabaseEntry>>) -> ReferenceTable {
        ReferenceTable::new(kind, entries)
    }

    #[test]
    fn test_priority_breaks_ties() {
        let tables = ReferenceTables::new()
            .with_table(table(DatabaseKind::States, vec![Some(DatabaseEntry::with_icon(7, "Poison"))]))
            .with_table(table(DatabaseKind::Weapons, vec![Some(DatabaseEntry::with_icon(7, "Dagger"))]))
            .with_table(table(DatabaseKind::Skills, vec![Some(DatabaseEntry::with_icon(7, "Venom"))]));
        assert_eq!(tables.find_name_by_icon_index(7), Some("Dagger"));
    }

    #[test]
    fn test_entry_order_within_table() {
        let items = table(
            DatabaseKind::Items,
            vec![
                None,
                Some(DatabaseEntry::with_icon(3, "Potion")),
                Some(DatabaseEntry::with_icon(3, "Hi-Potion")),
            ],
        );
        assert_eq!(find_name_by_icon_index(3, &[items]), Some("Potion"));
    }

    #[test]
    fn test_null_slots_are_skipped() {
        let states = ReferenceTable::from_json_str(
            DatabaseKind::States,
            r#"[null, null, {"id": 2, "name": "Sleep", "iconIndex": 5, "traits": []}]"#,
        )
        .unwrap();
        assert_eq!(states.entries.len(), 3);
        assert_eq!(find_name_by_icon_index(5, &[states]), Some("Sleep"));
    }

    #[test]
    fn test_unmatched_index_is_none() {
        let tables = ReferenceTables::new();
        assert_eq!(tables.find_name_by_icon_index(1), None);
    }

    #[test]
    fn test_first_match_without_name_stops_search() {
        let items = table(
            DatabaseKind::Items,
            vec![Some(DatabaseEntry { name: None, icon_index: Some(9), face_name: None })],
        );
        let states = table(DatabaseKind::States, vec![Some(DatabaseEntry::with_icon(9, "Stun"))]);
        assert_eq!(find_name_by_icon_index(9, &[items, states]), None);
    }

    #[test]
    fn test_actor_face_lookup() {
        let tables = ReferenceTables::new().with_table(table(
            DatabaseKind::Actors,
            vec![None, Some(DatabaseEntry::with_face("butterface", "Butterface the Cow"))],
        ));
        assert_eq!(tables.find_actor_name_by_face("butterface"), Some("Butterface the Cow"));
        assert_eq!(tables.find_actor_name_by_face("nobody"), None);
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = ReferenceTable::from_json_str(DatabaseKind::Items, "{not json").unwrap_err();
        assert!(err.to_string().contains("Items.json"));
    }
}
