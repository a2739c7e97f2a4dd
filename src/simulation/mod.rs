//! Standalone city builder core
//!
//! This module contains all the building, economy and persistence logic that
//! can run independently of the Bevy game engine. It can be driven from the
//! console without needing to boot up the full game.

mod builder;
mod camera;
mod catalog;
mod config;
mod economy;
mod grid;
mod persistence;
mod script;
mod types;

pub use builder::{
    ActionOutcome, BuildAction, BuildController, Cursor, FrameInput, FrameReport,
    PreviewDescriptor, CURSOR_FOLLOW_RATE, MAX_MAP_CELLS, PREVIEW_LIFT, PREVIEW_TRANSPARENCY,
};
pub use camera::{CameraInput, CameraRig, CameraSettings};
pub use catalog::{ModelDesc, StructureCatalog, StructureDef};
pub use config::GameConfig;
pub use economy::{BalancePolicy, Ledger, STARTING_BALANCE};
pub use grid::{CellEntry, PlacementGrid};
pub use persistence::{
    FileStore, MemoryStore, ObjectStore, SaveDocument, SaveEntry, DEFAULT_LOCATOR, SAVE_FORMAT,
    SAVE_VERSION,
};
pub use script::{parse_script, run_script, DEFAULT_SCRIPT, MAX_WAIT_FRAMES};
pub use types::{smoothing_weight, CellCoord, Orientation, Position, Ray};
