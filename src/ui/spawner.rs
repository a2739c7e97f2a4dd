//! Functions for spawning structure visuals

use bevy::prelude::*;

use super::components::PlacedStructure;
use crate::simulation::{CellCoord, ModelDesc, Orientation};

/// Cuboid mesh and material for a structure model, blended when `transparency` > 0
pub fn model_assets(
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    model: &ModelDesc,
    transparency: f32,
) -> (Mesh3d, MeshMaterial3d<StandardMaterial>) {
    let [width, height, depth] = model.size;
    let [r, g, b] = model.color;

    let material = if transparency > 0.0 {
        StandardMaterial {
            base_color: Color::srgba(r, g, b, 1.0 - transparency),
            alpha_mode: AlphaMode::Blend,
            ..default()
        }
    } else {
        StandardMaterial::from(Color::srgb(r, g, b))
    };

    (
        Mesh3d(meshes.add(Cuboid::new(width, height, depth))),
        MeshMaterial3d(materials.add(material)),
    )
}

/// Spawn a placed structure standing on its cell
pub fn spawn_structure_visual(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    cell: CellCoord,
    orientation: Orientation,
    model: &ModelDesc,
) -> Entity {
    let (mesh, material) = model_assets(meshes, materials, model, 0.0);
    let height = model.size[1];

    commands
        .spawn((
            PlacedStructure,
            mesh,
            material,
            Transform::from_xyz(cell.x as f32, height / 2.0, cell.z as f32)
                .with_rotation(Quat::from_rotation_y(orientation.yaw_radians())),
        ))
        .id()
}
