//! Structure catalog
//!
//! The static list of structures the player can place. Entries are addressed
//! by their index in the catalog and never change after startup.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Visual prototype for a structure, instantiated by the rendering layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelDesc {
    /// Width, height and depth in world units
    pub size: [f32; 3],
    /// Linear RGB colour
    pub color: [f32; 3],
}

/// A placeable structure definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureDef {
    /// Stable identifier written to save files
    pub id: String,
    pub name: String,
    pub price: u32,
    /// Character used by the ASCII map
    #[serde(default = "default_glyph")]
    pub glyph: char,
    pub model: ModelDesc,
}

impl ModelDesc {
    pub fn new(size: [f32; 3], color: [f32; 3]) -> Self {
        Self { size, color }
    }
}

fn default_glyph() -> char {
    '#'
}

impl StructureDef {
    pub fn new(id: &str, name: &str, price: u32, glyph: char, model: ModelDesc) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            price,
            glyph,
            model,
        }
    }
}

/// Immutable, index-addressed list of structure definitions
#[derive(Debug, Clone)]
pub struct StructureCatalog {
    structures: Vec<StructureDef>,
}

impl StructureCatalog {
    /// Build a catalog, rejecting empty lists and duplicate ids
    pub fn new(structures: Vec<StructureDef>) -> Result<Self> {
        if structures.is_empty() {
            bail!("structure catalog must contain at least one structure");
        }
        let mut seen = HashSet::new();
        for def in &structures {
            if !seen.insert(def.id.as_str()) {
                bail!("duplicate structure id '{}' in catalog", def.id);
            }
        }
        Ok(Self { structures })
    }

    /// Load a catalog from a JSON file containing a list of structure definitions
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read catalog {}", path.display()))?;
        let structures: Vec<StructureDef> = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse catalog {}", path.display()))?;
        Self::new(structures).with_context(|| format!("invalid catalog {}", path.display()))
    }

    /// The built-in set of city pieces
    pub fn default_city() -> Self {
        let grey = [0.35, 0.35, 0.38];
        let structures = vec![
            StructureDef::new(
                "road-straight",
                "Straight road",
                25,
                '=',
                ModelDesc::new([1.0, 0.05, 1.0], grey),
            ),
            StructureDef::new(
                "road-corner",
                "Road corner",
                25,
                '+',
                ModelDesc::new([1.0, 0.05, 1.0], grey),
            ),
            StructureDef::new(
                "pavement",
                "Pavement",
                50,
                ':',
                ModelDesc::new([1.0, 0.08, 1.0], [0.7, 0.7, 0.68]),
            ),
            StructureDef::new(
                "building-small",
                "Small building",
                500,
                'b',
                ModelDesc::new([0.8, 0.8, 0.8], [0.8, 0.55, 0.4]),
            ),
            StructureDef::new(
                "building-tall",
                "Tall building",
                1200,
                'B',
                ModelDesc::new([0.8, 2.0, 0.8], [0.55, 0.6, 0.75]),
            ),
            StructureDef::new(
                "garage",
                "Garage",
                300,
                'g',
                ModelDesc::new([0.9, 0.5, 0.9], [0.6, 0.5, 0.5]),
            ),
            StructureDef::new(
                "trees",
                "Trees",
                100,
                't',
                ModelDesc::new([0.5, 0.9, 0.5], [0.2, 0.55, 0.25]),
            ),
        ];
        Self { structures }
    }

    pub fn len(&self) -> usize {
        self.structures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.structures.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StructureDef> {
        self.structures.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StructureDef> {
        self.structures.iter()
    }

    /// Definition at `index` wrapped into the catalog
    pub fn wrapped(&self, index: usize) -> &StructureDef {
        &self.structures[index % self.structures.len()]
    }

    /// Index of the structure with the given stable id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.structures.iter().position(|def| def.id == id)
    }

    /// Wrap any signed index into `[0, len)`, so -1 maps to the last entry
    pub fn wrap_index(&self, index: isize) -> usize {
        index.rem_euclid(self.structures.len() as isize) as usize
    }
}
