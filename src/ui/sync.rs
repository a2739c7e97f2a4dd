//! Systems for syncing Bevy entities with the placement grid

use bevy::prelude::*;
use std::collections::HashSet;

use super::components::{BuilderResource, StructureMappings};
use super::spawner::spawn_structure_visual;
use crate::simulation::CellCoord;

/// System to spawn, replace and despawn structure visuals so they match the grid
pub fn sync_structures(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    builder: Res<BuilderResource>,
    mut mappings: ResMut<StructureMappings>,
) {
    let controller = &builder.0;
    let grid = controller.grid();

    // Despawn visuals for cleared cells or cells whose occupant changed
    let mut stale: Vec<CellCoord> = Vec::new();
    for (cell, (entity, shown)) in &mappings.cells {
        if grid.get(*cell) != Some(*shown) {
            commands.entity(*entity).despawn();
            stale.push(*cell);
        }
    }
    for cell in &stale {
        mappings.cells.remove(cell);
    }

    // Spawn visuals for newly occupied cells
    let shown: HashSet<CellCoord> = mappings.cells.keys().copied().collect();
    for (cell, entry) in grid.iter() {
        if shown.contains(&cell) {
            continue;
        }
        let Some(def) = controller.catalog().get(entry.structure) else {
            bevy::log::error!("Cell {} holds unknown structure {}", cell, entry.structure);
            continue;
        };
        let entity = spawn_structure_visual(
            &mut commands,
            &mut meshes,
            &mut materials,
            cell,
            entry.orientation,
            &def.model,
        );
        mappings.cells.insert(cell, (entity, entry));
    }
}
