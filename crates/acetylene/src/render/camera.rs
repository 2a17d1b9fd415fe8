//! 2D camera with a lazily rebuilt orthographic projection

use crate::foundation::math::{ortho, Mat4, Vec2, Vec3};

/// Exponential zoom state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraScale {
    /// Current zoom factor
    pub value: f32,
    /// Relative zoom rate per update unit
    pub velocity: f32,
}

impl Default for CameraScale {
    fn default() -> Self {
        Self {
            value: 1.0,
            velocity: 0.0,
        }
    }
}

/// Orthographic camera centred on `position`.
///
/// The projection is only rebuilt when the position, the zoom or the window
/// size differ from the values captured at the last rebuild. On a window
/// resize the position is rescaled by the size ratio, so camera positions are
/// effectively stored relative to the window size.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Centre of the view
    pub position: Vec3,
    /// Pan rate per update unit
    pub velocity: Vec2,
    /// Zoom
    pub scale: CameraScale,
    matrix: Mat4,
    prev_position: Vec3,
    prev_scale: f32,
    prev_window_dims: Vec2,
}

impl Camera {
    /// Create a camera at the origin for a window of `window_dims` pixels
    pub fn new(window_dims: Vec2) -> Self {
        Self::with_position(Vec3::zeros(), window_dims)
    }

    /// Create a camera centred on `position`
    pub fn with_position(position: Vec3, window_dims: Vec2) -> Self {
        let mut camera = Self {
            position,
            velocity: Vec2::zeros(),
            scale: CameraScale::default(),
            matrix: Mat4::identity(),
            prev_position: position,
            prev_scale: 1.0,
            prev_window_dims: window_dims,
        };
        camera.update_matrix(window_dims);
        camera.prev_position = camera.position;
        camera
    }

    /// Integrate motion and zoom, then rebuild the projection if anything it
    /// depends on changed.
    pub fn update(&mut self, dt: f32, window_dims: Vec2) {
        self.position.x += dt * self.velocity.x;
        self.position.y += dt * self.velocity.y;
        self.scale.value += dt * self.scale.velocity * self.scale.value;
        if self.scale.value < 0.0 {
            self.scale.value = 0.0;
        }
        if self.position != self.prev_position
            || self.scale.value != self.prev_scale
            || window_dims != self.prev_window_dims
        {
            self.update_matrix(window_dims);
            self.prev_position = self.position;
            self.prev_scale = self.scale.value;
            self.prev_window_dims = window_dims;
        }
    }

    /// Current projection
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Map a window-space point (pixels, origin bottom-left) into the world
    pub fn world_point(&self, screen: Vec2, window_dims: Vec2) -> Vec2 {
        let centered = (screen - window_dims / 2.0) / self.scale.value;
        Vec2::new(centered.x + self.position.x, centered.y + self.position.y)
    }

    /// Return to the default pose for `window_dims`
    pub fn reset(&mut self, window_dims: Vec2) {
        *self = Self::new(window_dims);
    }

    fn update_matrix(&mut self, window_dims: Vec2) {
        if self.prev_window_dims.x != 0.0 && self.prev_window_dims.y != 0.0 {
            self.position.x *= window_dims.x / self.prev_window_dims.x;
            self.position.y *= window_dims.y / self.prev_window_dims.y;
        }
        let projection = ortho(
            -window_dims.x / 2.0,
            window_dims.x / 2.0,
            -window_dims.y / 2.0,
            window_dims.y / 2.0,
        ) * Mat4::new_translation(&Vec3::new(-self.position.x, -self.position.y, 0.0));
        let zoom = Mat4::new_nonuniform_scaling(&Vec3::new(self.scale.value, self.scale.value, 0.0));
        self.matrix = zoom * projection;
    }
}
