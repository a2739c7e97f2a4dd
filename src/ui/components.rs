//! UI components and resources for linking Bevy entities to builder state

use bevy::prelude::*;
use std::collections::HashMap;

use crate::simulation::{BuildController, CameraRig, CellCoord, CellEntry, FileStore, FrameInput};

/// Resource wrapper for the build controller
#[derive(Resource)]
pub struct BuilderResource(pub BuildController);

/// Where the save and load actions read and write the map
#[derive(Resource)]
pub struct SaveStoreResource(pub FileStore);

/// Resource wrapper for the camera rig
#[derive(Resource)]
pub struct CameraRigResource(pub CameraRig);

/// Input gathered this frame for the build controller
#[derive(Resource, Default)]
pub struct PendingFrame(pub FrameInput);

/// Tracks the pointer while the camera rotation button is held
#[derive(Resource, Default)]
pub struct CameraRotateDrag {
    pub last_pos: Option<Vec2>,
}

/// Marker component for ground plane
#[derive(Component)]
pub struct Ground;

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the entity the camera rig moves; the camera is its child
#[derive(Component)]
pub struct CameraPivot;

/// Marker for the placement cursor
#[derive(Component)]
pub struct Selector;

/// Marker for the transparent model shown under the cursor
#[derive(Component)]
pub struct PreviewModel;

/// Marker for the visual of a placed structure
#[derive(Component)]
pub struct PlacedStructure;

/// Marker for the balance label
#[derive(Component)]
pub struct CashDisplay;

/// Marker for the selected structure label
#[derive(Component)]
pub struct SelectionDisplay;

/// Resource to track Bevy entities mapped to occupied cells
#[derive(Resource, Default)]
pub struct StructureMappings {
    pub cells: HashMap<CellCoord, (Entity, CellEntry)>,
}

/// Preview generation currently spawned under the cursor
#[derive(Resource, Default)]
pub struct PreviewState {
    pub shown_generation: Option<u64>,
}
