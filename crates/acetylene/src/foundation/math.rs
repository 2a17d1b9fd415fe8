//! Math utilities and types
//!
//! Provides the small set of vector and matrix types the 2D pipeline needs.

pub use nalgebra::{Matrix4, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type (also used for RGBA colors and `(x, y, w, h)` rectangles)
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Integer 2D vector, used for window dimensions in pixels
pub type IVec2 = Vector2<i32>;

/// Convert integer pixel dimensions into floating point
pub fn to_vec2(dims: IVec2) -> Vec2 {
    Vec2::new(dims.x as f32, dims.y as f32)
}

/// Orthographic projection matching the classic `ortho(left, right, bottom, top)`
/// form with a `[-1, 1]` depth range.
pub fn ortho(left: f32, right: f32, bottom: f32, top: f32) -> Mat4 {
    Mat4::new_orthographic(left, right, bottom, top, -1.0, 1.0)
}

/// Rotate `point` about `center` by `degrees` counter-clockwise.
pub fn rotate_about(point: Vec2, center: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let d = point - center;
    Vec2::new(cos * d.x - sin * d.y + center.x, sin * d.x + cos * d.y + center.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ortho_maps_corners_to_clip_space() {
        let m = ortho(-400.0, 400.0, -300.0, 300.0);
        let p = m * Vec4::new(400.0, 300.0, 0.0, 1.0);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 1.0);
    }

    #[test]
    fn test_rotate_about_quarter_turn() {
        let p = rotate_about(Vec2::new(2.0, 1.0), Vec2::new(1.0, 1.0), 90.0);
        assert_relative_eq!(p.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-5);
    }
}
