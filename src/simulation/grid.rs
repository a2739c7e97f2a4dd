//! Sparse placement grid
//!
//! Maps integer cells to the structure placed there. Cells without an entry
//! are empty; there is no bound on coordinates.

use std::collections::HashMap;

use super::types::{CellCoord, Orientation};

/// What occupies a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellEntry {
    /// Index into the structure catalog
    pub structure: usize,
    pub orientation: Orientation,
}

impl CellEntry {
    pub fn new(structure: usize, orientation: Orientation) -> Self {
        Self {
            structure,
            orientation,
        }
    }
}

/// Sparse map from cell coordinate to placed structure
#[derive(Debug, Clone, Default)]
pub struct PlacementGrid {
    cells: HashMap<CellCoord, CellEntry>,
}

impl PlacementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a cell, returning whatever was there before
    pub fn place(
        &mut self,
        cell: CellCoord,
        structure: usize,
        orientation: Orientation,
    ) -> Option<CellEntry> {
        self.cells.insert(cell, CellEntry::new(structure, orientation))
    }

    /// Clear a cell. Clearing an empty cell does nothing.
    pub fn remove(&mut self, cell: CellCoord) -> Option<CellEntry> {
        self.cells.remove(&cell)
    }

    pub fn get(&self, cell: CellCoord) -> Option<CellEntry> {
        self.cells.get(&cell).copied()
    }

    pub fn is_occupied(&self, cell: CellCoord) -> bool {
        self.cells.contains_key(&cell)
    }

    /// All occupied cells, in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, CellEntry)> + '_ {
        self.cells.iter().map(|(cell, entry)| (*cell, *entry))
    }

    /// Occupied cells sorted by `(x, z)`
    pub fn sorted(&self) -> Vec<(CellCoord, CellEntry)> {
        let mut cells: Vec<_> = self.iter().collect();
        cells.sort_by_key(|(cell, _)| *cell);
        cells
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Smallest rectangle covering every occupied cell as `(min, max)`
    pub fn bounds(&self) -> Option<(CellCoord, CellCoord)> {
        let mut cells = self.cells.keys();
        let first = *cells.next()?;
        Some(cells.fold((first, first), |(min, max), cell| {
            (
                CellCoord::new(min.x.min(cell.x), min.z.min(cell.z)),
                CellCoord::new(max.x.max(cell.x), max.z.max(cell.z)),
            )
        }))
    }
}
