use cubefall_common::Rgb;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A falling cube. Only the vertical axis carries velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cube {
    /// Center of the cube.
    pub position: Vec3,
    /// Uniform edge length.
    pub size: f32,
    pub velocity_y: f32,
    pub color: Rgb,
}

impl Cube {
    /// A cube at rest at `position`.
    pub fn new(position: Vec3, size: f32, color: Rgb) -> Self {
        Self {
            position,
            size,
            velocity_y: 0.0,
            color,
        }
    }

    pub fn half_size(&self) -> f32 {
        self.size / 2.0
    }

    /// y coordinate of the lower face.
    pub fn bottom(&self) -> f32 {
        self.position.y - self.half_size()
    }
}
