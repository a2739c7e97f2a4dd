//! Input handling systems
//!
//! Maps physical keys and buttons onto the builder's logical actions and the
//! camera rig's axes.

use bevy::prelude::*;

use super::components::{CameraRotateDrag, PendingFrame};
use crate::simulation::{BuildAction, CameraInput};

/// Handle basic keyboard input
pub fn handle_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

/// Queue this frame's discrete build actions
pub fn collect_build_actions(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut pending: ResMut<PendingFrame>,
) {
    let actions = &mut pending.0.actions;
    actions.clear();

    if keyboard.just_pressed(KeyCode::KeyR) {
        actions.push(BuildAction::Rotate);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        actions.push(BuildAction::NextStructure);
    }
    if keyboard.just_pressed(KeyCode::KeyQ) {
        actions.push(BuildAction::PreviousStructure);
    }
    if mouse_button.just_pressed(MouseButton::Left) {
        actions.push(BuildAction::Build);
    }
    if mouse_button.just_pressed(MouseButton::Right) || keyboard.just_pressed(KeyCode::Delete) {
        actions.push(BuildAction::Demolish);
    }
    if keyboard.just_pressed(KeyCode::F5) {
        actions.push(BuildAction::Save);
    }
    if keyboard.just_pressed(KeyCode::F9) {
        actions.push(BuildAction::Load);
    }
}

/// Read camera movement keys and the rotate drag
pub fn collect_camera_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window>,
    mut drag: ResMut<CameraRotateDrag>,
) -> CameraInput {
    let axis = |negative: [KeyCode; 2], positive: [KeyCode; 2]| {
        let mut value = 0.0;
        if keyboard.any_pressed(negative) {
            value -= 1.0;
        }
        if keyboard.any_pressed(positive) {
            value += 1.0;
        }
        value
    };

    let mut input = CameraInput {
        axis_x: axis(
            [KeyCode::KeyA, KeyCode::ArrowLeft],
            [KeyCode::KeyD, KeyCode::ArrowRight],
        ),
        axis_z: axis(
            [KeyCode::KeyW, KeyCode::ArrowUp],
            [KeyCode::KeyS, KeyCode::ArrowDown],
        ),
        center: keyboard.pressed(KeyCode::Space),
        rotate: mouse_button.pressed(MouseButton::Middle),
        pointer_dx: 0.0,
    };

    let cursor = windows
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    if input.rotate {
        if let (Some(last), Some(pos)) = (drag.last_pos, cursor) {
            input.pointer_dx = pos.x - last.x;
        }
        drag.last_pos = cursor;
    } else {
        drag.last_pos = None;
    }

    input
}
