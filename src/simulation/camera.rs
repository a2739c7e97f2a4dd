//! Camera rig
//!
//! Accumulates target position and rotation from player input and eases the
//! actual pose toward them every frame. Independent of the build controller.

use super::types::{smoothing_weight, Position};

/// Tuning for the camera rig
#[derive(Debug, Clone, Copy)]
pub struct CameraSettings {
    /// Distance the target moves per frame while a direction is held
    pub move_step: f32,
    /// Smoothing rate for position, per second
    pub position_smoothing: f32,
    /// Smoothing rate for rotation, per second
    pub rotation_smoothing: f32,
    /// Degrees of yaw per pixel of pointer movement while rotating
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            move_step: 0.25,
            position_smoothing: 8.0,
            rotation_smoothing: 6.0,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Raw camera input for one frame
#[derive(Debug, Clone, Copy, Default)]
pub struct CameraInput {
    /// -1 for left, +1 for right
    pub axis_x: f32,
    /// -1 for forward, +1 for back
    pub axis_z: f32,
    /// Reset the target to the origin
    pub center: bool,
    /// Rotation modifier held
    pub rotate: bool,
    /// Horizontal pointer movement in pixels since the last frame
    pub pointer_dx: f32,
}

/// Smoothed camera pose
#[derive(Debug, Clone)]
pub struct CameraRig {
    pub settings: CameraSettings,
    position: Position,
    /// Pitch, yaw and roll in degrees
    rotation: Position,
    target_position: Position,
    target_rotation: Position,
}

impl CameraRig {
    /// A rig at the origin with the given initial rotation in degrees
    pub fn new(rotation_degrees: Position, settings: CameraSettings) -> Self {
        Self {
            settings,
            position: Position::ZERO,
            rotation: rotation_degrees,
            target_position: Position::ZERO,
            target_rotation: rotation_degrees,
        }
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Current rotation in degrees (x = pitch, y = yaw, z = roll)
    pub fn rotation_degrees(&self) -> Position {
        self.rotation
    }

    pub fn target_position(&self) -> Position {
        self.target_position
    }

    pub fn target_rotation_degrees(&self) -> Position {
        self.target_rotation
    }

    pub fn yaw_radians(&self) -> f32 {
        self.rotation.y.to_radians()
    }

    /// Ease toward the targets, then fold this frame's input into them
    pub fn update(&mut self, input: &CameraInput, delta_secs: f32) {
        let position_weight = smoothing_weight(delta_secs, self.settings.position_smoothing);
        let rotation_weight = smoothing_weight(delta_secs, self.settings.rotation_smoothing);
        self.position = self.position.lerp(&self.target_position, position_weight);
        self.rotation = self.rotation.lerp(&self.target_rotation, rotation_weight);

        let movement = Position::new(input.axis_x, 0.0, input.axis_z)
            .rotated_y(self.yaw_radians())
            .normalized()
            .scale(self.settings.move_step);
        self.target_position = self.target_position.add(&movement);

        if input.center {
            self.target_position = Position::ZERO;
        }

        if input.rotate {
            self.target_rotation.y -= input.pointer_dx * self.settings.mouse_sensitivity;
        }
    }
}
