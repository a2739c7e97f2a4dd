//! Camera systems: spawn the pivot and drive it from the camera rig

use bevy::prelude::*;

use super::components::{CameraPivot, CameraRigResource, MainCamera};
use crate::simulation::{CameraInput, CameraRig, CameraSettings, Position};

/// Initial camera rotation in degrees (pitch, yaw, roll)
const INITIAL_ROTATION: Position = Position {
    x: 0.0,
    y: 45.0,
    z: 0.0,
};

impl Default for CameraRigResource {
    fn default() -> Self {
        Self(CameraRig::new(INITIAL_ROTATION, CameraSettings::default()))
    }
}

/// System to spawn the camera pivot with the camera looking down at it
pub fn setup_camera(mut commands: Commands, rig: Res<CameraRigResource>) {
    commands
        .spawn((
            CameraPivot,
            pivot_transform(&rig.0),
            Visibility::default(),
        ))
        .with_children(|pivot| {
            pivot.spawn((
                MainCamera,
                Camera3d::default(),
                Transform::from_xyz(0.0, 12.0, 12.0).looking_at(Vec3::ZERO, Vec3::Y),
            ));
        });
}

/// System to advance the rig with this frame's input and move the pivot
pub fn update_camera_rig(
    In(input): In<CameraInput>,
    time: Res<Time>,
    mut rig: ResMut<CameraRigResource>,
    mut pivot_query: Query<&mut Transform, With<CameraPivot>>,
) {
    rig.0.update(&input, time.delta_secs());

    let Ok(mut transform) = pivot_query.single_mut() else {
        return;
    };
    *transform = pivot_transform(&rig.0);
}

fn pivot_transform(rig: &CameraRig) -> Transform {
    let position = rig.position();
    let rotation = rig.rotation_degrees();
    Transform::from_xyz(position.x, position.y, position.z).with_rotation(Quat::from_euler(
        EulerRot::YXZ,
        rotation.y.to_radians(),
        rotation.x.to_radians(),
        rotation.z.to_radians(),
    ))
}
