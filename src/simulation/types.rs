//! Core types for the grid builder
//!
//! These are standalone types that don't depend on Bevy.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A 3D position in world space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ZERO: Position = Position {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    pub fn length(&self) -> f32 {
        self.distance(&Position::ZERO)
    }

    pub fn lerp(&self, other: &Position, t: f32) -> Position {
        Position {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
            z: self.z + (other.z - self.z) * t,
        }
    }

    pub fn scale(&self, factor: f32) -> Position {
        Position::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn add(&self, other: &Position) -> Position {
        Position::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Unit vector in the same direction, or zero for a zero vector
    pub fn normalized(&self) -> Position {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            Position::ZERO
        }
    }

    /// Rotate around the +Y axis by `angle` radians (counter-clockwise seen from above)
    pub fn rotated_y(&self, angle: f32) -> Position {
        let (sin, cos) = angle.sin_cos();
        Position {
            x: self.x * cos + self.z * sin,
            y: self.y,
            z: -self.x * sin + self.z * cos,
        }
    }
}

/// An integer grid coordinate identifying one buildable tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    pub x: i32,
    pub z: i32,
}

impl CellCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Cell containing a world-space point on the ground plane
    pub fn from_world(position: &Position) -> Self {
        Self {
            x: position.x.round() as i32,
            z: position.z.round() as i32,
        }
    }

    /// Centre of the cell on the ground plane
    pub fn to_world(self) -> Position {
        Position::new(self.x as f32, 0.0, self.z as f32)
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

/// Rotation of a placed structure in quarter turns around +Y
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Orientation(u8);

impl Orientation {
    pub const NORTH: Orientation = Orientation(0);
    pub const EAST: Orientation = Orientation(1);
    pub const SOUTH: Orientation = Orientation(2);
    pub const WEST: Orientation = Orientation(3);

    /// Build from any number of quarter turns, wrapping mod 4
    pub fn from_quarter_turns(turns: i64) -> Self {
        Orientation(turns.rem_euclid(4) as u8)
    }

    pub fn quarter_turns(self) -> u8 {
        self.0
    }

    /// Next orientation, 90 degrees further
    pub fn rotated(self) -> Self {
        Orientation((self.0 + 1) % 4)
    }

    pub fn yaw_radians(self) -> f32 {
        f32::from(self.0) * std::f32::consts::FRAC_PI_2
    }
}

/// A ray in world space, typically cast from the camera through the pointer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Position,
    pub direction: Position,
}

impl Ray {
    pub fn new(origin: Position, direction: Position) -> Self {
        Self { origin, direction }
    }

    /// A ray pointing straight down onto the given ground point
    pub fn looking_down_at(x: f32, z: f32) -> Self {
        Self::new(Position::new(x, 10.0, z), Position::new(0.0, -1.0, 0.0))
    }

    /// Intersect with the infinite ground plane `y = 0`.
    ///
    /// Returns `None` when the ray is parallel to the plane or points away from it.
    pub fn intersect_ground(&self) -> Option<Position> {
        if self.direction.y.abs() < PLANE_EPSILON {
            return None;
        }
        let distance = -self.origin.y / self.direction.y;
        if distance < 0.0 {
            return None;
        }
        Some(self.origin.add(&self.direction.scale(distance)))
    }
}

/// Direction components smaller than this are treated as parallel to the ground
const PLANE_EPSILON: f32 = 1e-5;

/// Clamp a smoothing weight so a long frame can never overshoot the target
pub fn smoothing_weight(delta_secs: f32, rate: f32) -> f32 {
    (delta_secs * rate).clamp(0.0, 1.0)
}
