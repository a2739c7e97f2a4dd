//! Build controller
//!
//! Turns the pointer ray and the player's discrete actions into grid edits,
//! cursor movement and save/load calls, once per frame.

use log::{debug, info, warn};

use super::catalog::{ModelDesc, StructureCatalog, StructureDef};
use super::config::GameConfig;
use super::economy::Ledger;
use super::grid::{CellEntry, PlacementGrid};
use super::persistence::{ObjectStore, SaveDocument, DEFAULT_LOCATOR};
use super::types::{smoothing_weight, CellCoord, Orientation, Position, Ray};

/// Rate at which the cursor follows the candidate cell
pub const CURSOR_FOLLOW_RATE: f32 = 40.0;
/// Transparency of the preview model
pub const PREVIEW_TRANSPARENCY: f32 = 0.5;
/// Height the preview floats above placed structures, to avoid z-fighting
pub const PREVIEW_LIFT: f32 = 0.05;
/// Largest area `draw_map` renders as a grid; wider maps are listed per cell
pub const MAX_MAP_CELLS: u64 = 16_384;

/// A discrete player action.
///
/// Variants are declared in the order they are applied within one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildAction {
    Rotate,
    NextStructure,
    PreviousStructure,
    Build,
    Demolish,
    Save,
    Load,
}

/// Everything the controller consumes in one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Ray from the camera through the pointer, if the pointer is over the window
    pub pointer: Option<Ray>,
    /// Actions triggered this frame
    pub actions: Vec<BuildAction>,
}

impl FrameInput {
    pub fn new(pointer: Option<Ray>, actions: Vec<BuildAction>) -> Self {
        Self { pointer, actions }
    }

    /// Pointer straight above a ground point, with the given actions
    pub fn at(x: f32, z: f32, actions: Vec<BuildAction>) -> Self {
        Self::new(Some(Ray::looking_down_at(x, z)), actions)
    }
}

/// What a single action did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Rotated(Orientation),
    Selected(usize),
    Placed {
        cell: CellCoord,
        structure: usize,
        previous: Option<CellEntry>,
        cost: u32,
    },
    /// Refused because the ledger policy does not allow the purchase
    Unaffordable { cell: CellCoord, cost: u32 },
    Demolished {
        cell: CellCoord,
        previous: Option<CellEntry>,
    },
    Saved { entries: usize },
    SaveFailed(String),
    Loaded {
        entries: usize,
        /// True when the stored map was missing or unreadable
        recovered_default: bool,
    },
    /// Build or demolish with no candidate cell under the pointer
    Skipped(BuildAction),
}

/// Result of one controller tick
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    pub candidate: Option<CellCoord>,
    pub outcomes: Vec<ActionOutcome>,
}

impl FrameReport {
    /// True if the grid or the balance changed this frame
    pub fn map_changed(&self) -> bool {
        self.outcomes.iter().any(|outcome| {
            matches!(
                outcome,
                ActionOutcome::Placed { .. }
                    | ActionOutcome::Demolished { .. }
                    | ActionOutcome::Loaded { .. }
            )
        })
    }
}

/// The placement cursor
#[derive(Debug, Clone)]
pub struct Cursor {
    /// Smoothed position shown on screen
    pub position: Position,
    /// Orientation new structures are placed with
    pub orientation: Orientation,
    /// Continuous yaw in radians, grows by a quarter turn per rotation
    pub yaw: f32,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            position: Position::ZERO,
            orientation: Orientation::NORTH,
            yaw: 0.0,
        }
    }
}

/// The model the rendering layer should show under the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewDescriptor {
    pub structure: usize,
    pub structure_id: String,
    pub model: ModelDesc,
    pub transparency: f32,
    pub lift: f32,
    /// Incremented every time the descriptor is replaced
    pub generation: u64,
}

/// Owns the grid and the ledger and applies the player's actions to them
pub struct BuildController {
    catalog: StructureCatalog,
    grid: PlacementGrid,
    ledger: Ledger,
    starting_balance: i64,
    active: usize,
    cursor: Cursor,
    candidate: Option<CellCoord>,
    preview: PreviewDescriptor,
    locator: String,
}

impl BuildController {
    pub fn new(config: &GameConfig) -> Self {
        let catalog = config.catalog.clone();
        let preview = Self::describe_preview(&catalog, 0, 0);
        Self {
            catalog,
            grid: PlacementGrid::new(),
            ledger: Ledger::new(config.starting_balance, config.balance_policy),
            starting_balance: config.starting_balance,
            active: 0,
            cursor: Cursor::default(),
            candidate: None,
            preview,
            locator: DEFAULT_LOCATOR.to_string(),
        }
    }

    pub fn with_locator(mut self, locator: &str) -> Self {
        self.locator = locator.to_string();
        self
    }

    pub fn catalog(&self) -> &StructureCatalog {
        &self.catalog
    }

    pub fn grid(&self) -> &PlacementGrid {
        &self.grid
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn balance(&self) -> i64 {
        self.ledger.balance()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_structure(&self) -> &StructureDef {
        self.catalog.wrapped(self.active)
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn candidate(&self) -> Option<CellCoord> {
        self.candidate
    }

    pub fn preview(&self) -> &PreviewDescriptor {
        &self.preview
    }

    /// Run one frame
    pub fn tick(
        &mut self,
        frame: &FrameInput,
        delta_secs: f32,
        store: &mut dyn ObjectStore,
    ) -> FrameReport {
        self.candidate = frame
            .pointer
            .and_then(|ray| ray.intersect_ground())
            .map(|hit| CellCoord::from_world(&hit));

        if let Some(cell) = self.candidate {
            let weight = smoothing_weight(delta_secs, CURSOR_FOLLOW_RATE);
            self.cursor.position = self.cursor.position.lerp(&cell.to_world(), weight);
        }

        let mut actions = frame.actions.clone();
        actions.sort();

        let mut report = FrameReport {
            candidate: self.candidate,
            outcomes: Vec::with_capacity(actions.len()),
        };
        for action in actions {
            let outcome = self.apply(action, store);
            report.outcomes.push(outcome);
        }
        report
    }

    fn apply(&mut self, action: BuildAction, store: &mut dyn ObjectStore) -> ActionOutcome {
        match action {
            BuildAction::Rotate => ActionOutcome::Rotated(self.rotate()),
            BuildAction::NextStructure => ActionOutcome::Selected(self.cycle(1)),
            BuildAction::PreviousStructure => ActionOutcome::Selected(self.cycle(-1)),
            BuildAction::Build => match self.candidate {
                Some(cell) => self.build(cell),
                None => Self::skip(action),
            },
            BuildAction::Demolish => match self.candidate {
                Some(cell) => self.demolish(cell),
                None => Self::skip(action),
            },
            BuildAction::Save => self.save(store),
            BuildAction::Load => self.load(store),
        }
    }

    fn skip(action: BuildAction) -> ActionOutcome {
        debug!("{:?} ignored: no cell under the pointer", action);
        ActionOutcome::Skipped(action)
    }

    /// Turn the cursor a quarter turn
    pub fn rotate(&mut self) -> Orientation {
        self.cursor.orientation = self.cursor.orientation.rotated();
        self.cursor.yaw += std::f32::consts::FRAC_PI_2;
        self.cursor.orientation
    }

    /// Move the active structure by `step`, wrapping at both ends of the catalog
    pub fn cycle(&mut self, step: isize) -> usize {
        self.select(self.active as isize + step)
    }

    /// Make `index` (wrapped into the catalog) the active structure
    pub fn select(&mut self, index: isize) -> usize {
        self.active = self.catalog.wrap_index(index);
        self.preview =
            Self::describe_preview(&self.catalog, self.active, self.preview.generation + 1);
        self.active
    }

    /// Place the active structure at `cell` with the cursor's orientation
    pub fn build(&mut self, cell: CellCoord) -> ActionOutcome {
        let previous = self.grid.get(cell);
        let is_same = previous.is_some_and(|entry| entry.structure == self.active);
        let price = self.active_structure().price;
        let cost = if is_same { 0 } else { price };

        if !self.ledger.spend(cost) {
            info!(
                "Cannot afford {} (${}) with balance {}",
                self.active_structure().name,
                cost,
                self.ledger.display()
            );
            return ActionOutcome::Unaffordable { cell, cost };
        }

        self.grid.place(cell, self.active, self.cursor.orientation);
        debug!(
            "Placed {} at {} for ${}, balance {}",
            self.active_structure().id,
            cell,
            cost,
            self.ledger.display()
        );

        ActionOutcome::Placed {
            cell,
            structure: self.active,
            previous,
            cost,
        }
    }

    /// Clear `cell`. Nothing is refunded.
    pub fn demolish(&mut self, cell: CellCoord) -> ActionOutcome {
        let previous = self.grid.remove(cell);
        if previous.is_some() {
            debug!("Demolished structure at {}", cell);
        }
        ActionOutcome::Demolished { cell, previous }
    }

    /// Snapshot of the grid and balance
    pub fn snapshot(&self) -> SaveDocument {
        SaveDocument::capture(&self.grid, self.ledger.balance(), &self.catalog)
    }

    /// Write the map to `store`. Failures are logged and reported, never raised.
    pub fn save(&mut self, store: &mut dyn ObjectStore) -> ActionOutcome {
        info!("Saving map...");
        let document = self.snapshot();
        match store.save(&self.locator, &document) {
            Ok(()) => ActionOutcome::Saved {
                entries: document.entries.len(),
            },
            Err(e) => {
                warn!("Failed to save map: {:#}", e);
                ActionOutcome::SaveFailed(format!("{:#}", e))
            }
        }
    }

    /// Replace the map with the one in `store`, or a fresh map if it can't be read
    pub fn load(&mut self, store: &mut dyn ObjectStore) -> ActionOutcome {
        info!("Loading map...");
        self.grid.clear();

        let (document, recovered_default) = match store.load(&self.locator) {
            Ok(document) => (document, false),
            Err(e) => {
                warn!("Could not load map, starting fresh: {:#}", e);
                (SaveDocument::fresh(self.starting_balance), true)
            }
        };

        let entries = document.restore_into(&mut self.grid, &self.catalog);
        self.ledger.set_balance(document.balance);

        ActionOutcome::Loaded {
            entries,
            recovered_default,
        }
    }

    fn describe_preview(
        catalog: &StructureCatalog,
        index: usize,
        generation: u64,
    ) -> PreviewDescriptor {
        let def = catalog.wrapped(index);
        PreviewDescriptor {
            structure: index,
            structure_id: def.id.clone(),
            model: def.model.clone(),
            transparency: PREVIEW_TRANSPARENCY,
            lift: PREVIEW_LIFT,
            generation,
        }
    }

    /// One-line state summary
    pub fn summary(&self) -> String {
        format!(
            "Balance: {} | Structures: {} | Selected: {} | Orientation: {}",
            self.ledger.display(),
            self.grid.len(),
            self.active_structure().name,
            self.cursor.orientation.quarter_turns()
        )
    }

    /// ASCII rendering of the occupied area, one row per z, glyphs from the catalog.
    ///
    /// Areas larger than [`MAX_MAP_CELLS`] fall back to one line per occupied cell.
    pub fn draw_map(&self) -> String {
        let Some((min, max)) = self.grid.bounds() else {
            return "(empty map)".to_string();
        };

        let width = (i64::from(max.x) - i64::from(min.x) + 1) as u64;
        let depth = (i64::from(max.z) - i64::from(min.z) + 1) as u64;
        if width.saturating_mul(depth) > MAX_MAP_CELLS {
            return self.list_cells(width, depth);
        }

        let mut out = String::new();
        for z in min.z..=max.z {
            out.push_str(&format!("{:>4} ", z));
            for x in min.x..=max.x {
                out.push(self.glyph_at(CellCoord::new(x, z)));
            }
            out.push('\n');
        }
        out.push_str(&format!("     x: {}..={}", min.x, max.x));
        out
    }

    fn list_cells(&self, width: u64, depth: u64) -> String {
        let mut out = format!("(map spans {width}x{depth} cells, listing occupied cells)");
        for (cell, _) in self.grid.sorted() {
            out.push_str(&format!("\n{} {}", cell, self.glyph_at(cell)));
        }
        out
    }

    fn glyph_at(&self, cell: CellCoord) -> char {
        self.grid
            .get(cell)
            .and_then(|entry| self.catalog.get(entry.structure))
            .map_or('.', |def| def.glyph)
    }
}
