//! Saving and loading maps
//!
//! A map is flattened into a [`SaveDocument`] and handed to an [`ObjectStore`].
//! The file store writes pretty JSON so saves stay readable and diffable.

use anyhow::{bail, Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::catalog::StructureCatalog;
use super::grid::PlacementGrid;
use super::types::{CellCoord, Orientation};

/// Tag identifying a grid builder map document
pub const SAVE_FORMAT: &str = "grid_builder/map";

/// Current document version. Documents with a newer version are rejected.
pub const SAVE_VERSION: u32 = 1;

/// Locator of the map written by the save and load actions
pub const DEFAULT_LOCATOR: &str = "map";

/// One placed structure in a save document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveEntry {
    pub cell: CellCoord,
    pub orientation: u8,
    /// Catalog index at the time of saving
    pub structure: usize,
    /// Stable catalog id, preferred over the index when loading
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure_id: Option<String>,
}

/// Flattened snapshot of the grid and the balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveDocument {
    pub format: String,
    pub version: u32,
    pub balance: i64,
    pub entries: Vec<SaveEntry>,
}

impl SaveDocument {
    /// Empty map with the given balance
    pub fn fresh(balance: i64) -> Self {
        Self {
            format: SAVE_FORMAT.to_string(),
            version: SAVE_VERSION,
            balance,
            entries: Vec::new(),
        }
    }

    /// Flatten a grid into a document, entries sorted by cell
    pub fn capture(grid: &PlacementGrid, balance: i64, catalog: &StructureCatalog) -> Self {
        let entries = grid
            .sorted()
            .into_iter()
            .map(|(cell, entry)| SaveEntry {
                cell,
                orientation: entry.orientation.quarter_turns(),
                structure: entry.structure,
                structure_id: catalog.get(entry.structure).map(|def| def.id.clone()),
            })
            .collect();

        Self {
            balance,
            entries,
            ..Self::fresh(balance)
        }
    }

    /// Check the format tag and version
    pub fn validate(&self) -> Result<()> {
        if self.format != SAVE_FORMAT {
            bail!("unexpected save format '{}'", self.format);
        }
        if self.version > SAVE_VERSION {
            bail!(
                "save version {} is newer than supported version {}",
                self.version,
                SAVE_VERSION
            );
        }
        Ok(())
    }

    /// Fill `grid` with the document's entries, resolving structures against `catalog`.
    ///
    /// Entries are matched by stable id first and by index second. Entries that
    /// match neither are dropped. Returns the number of entries placed.
    pub fn restore_into(&self, grid: &mut PlacementGrid, catalog: &StructureCatalog) -> usize {
        let mut placed = 0;
        for entry in &self.entries {
            let Some(structure) = resolve_structure(entry, catalog) else {
                warn!(
                    "Dropping saved structure at {}: {:?} (index {}) is not in the catalog",
                    entry.cell, entry.structure_id, entry.structure
                );
                continue;
            };
            let orientation = Orientation::from_quarter_turns(i64::from(entry.orientation));
            grid.place(entry.cell, structure, orientation);
            placed += 1;
        }
        placed
    }
}

fn resolve_structure(entry: &SaveEntry, catalog: &StructureCatalog) -> Option<usize> {
    if let Some(id) = &entry.structure_id {
        if let Some(index) = catalog.index_of(id) {
            return Some(index);
        }
        // An id that no longer exists must not silently map onto another structure
        return None;
    }
    (entry.structure < catalog.len()).then_some(entry.structure)
}

/// Storage for save documents, addressed by a locator string
pub trait ObjectStore {
    fn save(&mut self, locator: &str, document: &SaveDocument) -> Result<()>;
    fn load(&self, locator: &str) -> Result<SaveDocument>;
}

fn decode(text: &str) -> Result<SaveDocument> {
    let document: SaveDocument =
        serde_json::from_str(text).context("failed to parse save document")?;
    document.validate()?;
    Ok(document)
}

/// Stores documents as `<dir>/<locator>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Per-user data directory, or `./saves` when the platform has none
    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("grid_builder"))
            .unwrap_or_else(|| PathBuf::from("./saves"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, locator: &str) -> PathBuf {
        self.dir.join(format!("{locator}.json"))
    }
}

impl ObjectStore for FileStore {
    fn save(&mut self, locator: &str, document: &SaveDocument) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create save directory {}", self.dir.display()))?;

        let path = self.path_for(locator);
        let json = serde_json::to_string_pretty(document).context("failed to encode map")?;

        // Write next to the target and rename so readers never see a partial file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, json).with_context(|| format!("failed to write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .with_context(|| format!("failed to move save into place at {}", path.display()))?;

        debug!("Wrote {} entries to {}", document.entries.len(), path.display());
        Ok(())
    }

    fn load(&self, locator: &str) -> Result<SaveDocument> {
        let path = self.path_for(locator);
        let text = fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        decode(&text).with_context(|| format!("invalid save file {}", path.display()))
    }
}

/// Keeps encoded documents in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text under a locator, whether or not it is a valid document
    pub fn insert_raw(&mut self, locator: &str, text: &str) {
        self.documents.insert(locator.to_string(), text.to_string());
    }

    pub fn raw(&self, locator: &str) -> Option<&str> {
        self.documents.get(locator).map(String::as_str)
    }
}

impl ObjectStore for MemoryStore {
    fn save(&mut self, locator: &str, document: &SaveDocument) -> Result<()> {
        let json = serde_json::to_string(document).context("failed to encode map")?;
        self.documents.insert(locator.to_string(), json);
        Ok(())
    }

    fn load(&self, locator: &str) -> Result<SaveDocument> {
        let text = self
            .documents
            .get(locator)
            .with_context(|| format!("no document stored under '{locator}'"))?;
        decode(text)
    }
}
