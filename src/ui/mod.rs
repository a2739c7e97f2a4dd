//! UI module that renders the builder state using Bevy
//!
//! This module is purely glue - all game rules live in the `simulation` module.
//! The UI feeds input to `BuildController` and `CameraRig` and draws their state
//! with Bevy's 3D graphics.

mod building;
mod camera;
mod components;
mod input;
pub mod spawner;
mod sync;
mod world;

use bevy::prelude::*;

pub use components::{BuilderResource, CameraRigResource, SaveStoreResource};

use crate::simulation::{BuildController, FileStore, GameConfig};
use building::{
    setup_building_ui, tick_builder, update_cursor, update_labels, update_pointer_ray,
    update_preview,
};
use camera::{setup_camera, update_camera_rig};
use components::*;
use input::{collect_build_actions, collect_camera_input, handle_input};
use sync::sync_structures;
use world::setup_world;

/// Plugin to register all UI systems
pub struct GridBuilderUIPlugin {
    pub config: GameConfig,
}

impl Plugin for GridBuilderUIPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(BuilderResource(BuildController::new(&self.config)))
            .insert_resource(SaveStoreResource(FileStore::new(&self.config.save_dir)))
            .init_resource::<CameraRigResource>()
            .init_resource::<PendingFrame>()
            .init_resource::<CameraRotateDrag>()
            .init_resource::<StructureMappings>()
            .init_resource::<PreviewState>()
            .add_systems(Startup, (setup_world, setup_camera, setup_building_ui))
            .add_systems(
                Update,
                (
                    handle_input,
                    collect_camera_input.pipe(update_camera_rig),
                    (
                        collect_build_actions,
                        update_pointer_ray,
                        tick_builder,
                        (sync_structures, update_cursor, update_preview, update_labels),
                    )
                        .chain(),
                ),
            );
    }
}
