//! Positioned, moving things

use crate::foundation::math::{Vec2, Vec3};

/// Position plus linear velocity.
///
/// `position.z` is a draw-order key only: lower values are drawn first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Entity {
    /// Position, `z` = depth
    pub position: Vec3,
    /// Motion per update unit
    pub velocity: Vec2,
}

impl Entity {
    /// Create a resting entity
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            velocity: Vec2::zeros(),
        }
    }

    /// Integrate position by velocity
    pub fn update(&mut self, dt: f32) {
        self.position.x += dt * self.velocity.x;
        self.position.y += dt * self.velocity.y;
    }
}
