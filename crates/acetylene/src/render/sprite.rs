//! Textured or flat-colored quads
//!
//! A [`Sprite`] regenerates its four vertices on every [`Sprite::draw`] call.
//! Vertices are emitted counter-clockwise starting bottom-left, which is what
//! the renderer's `{0, 1, 2, 2, 3, 0}` index pattern expects.

use crate::foundation::math::{rotate_about, Vec2, Vec3, Vec4};
use crate::render::entity::Entity;
use bitflags::bitflags;
use bytemuck::{Pod, Zeroable};

/// Fragment mode: sample the texture
pub const MODE_TEXTURE: f32 = 0.0;
/// Fragment mode: flat color
pub const MODE_COLOR: f32 = 1.0;
/// Fragment mode: glyph coverage in the texture red channel, tinted by color
pub const MODE_GLYPH: f32 = 2.0;

/// One vertex of the sprite stream: position 3, uv 2, color 4, mode 1
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct SpriteVertex {
    /// World position, `z` = depth
    pub position: [f32; 3],
    /// Texture coordinates
    pub uv: [f32; 2],
    /// RGBA color
    pub color: [f32; 4],
    /// One of the `MODE_*` constants
    pub mode: f32,
}

/// Floats per [`SpriteVertex`]
pub const FLOATS_PER_VERTEX: usize = 10;

/// Attribute sizes of [`SpriteVertex`], in floats
pub const SPRITE_ATTRIBUTES: [u32; 4] = [3, 2, 4, 1];

bitflags! {
    /// Texture mirroring
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Reflect: u8 {
        /// Mirror left-right
        const HORIZONTAL = 1;
        /// Mirror top-bottom
        const VERTICAL = 2;
    }
}

/// Spin state in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    /// Angle in degrees, counter-clockwise about the quad centre
    pub angle: f32,
    /// Degrees per update unit
    pub velocity: f32,
}

/// Texture reference by file name plus the UV sub-rectangle to show
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    /// Image path; empty means untextured
    pub file_name: String,
    /// UV rectangle `(u, v, width, height)`
    pub coords: Vec4,
}

impl Default for Texture {
    fn default() -> Self {
        Self::new("")
    }
}

impl Texture {
    /// Whole-image texture reference
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            coords: Vec4::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

/// A textured or flat-colored rectangle
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sprite {
    /// Position and velocity
    pub entity: Entity,
    /// Size in world units
    pub dimensions: Vec2,
    /// Spin
    pub rotation: Rotation,
    /// Image and UV rectangle
    pub texture: Texture,
    /// Fill color for untextured sprites, tint for glyphs
    pub color: Vec4,
    /// Mirroring
    pub reflect: Reflect,
    vertices: Vec<SpriteVertex>,
}

impl Sprite {
    /// Textured sprite
    pub fn new(position: Vec3, dimensions: Vec2, texture_file: impl Into<String>) -> Self {
        Self {
            entity: Entity::new(position),
            dimensions,
            texture: Texture::new(texture_file),
            ..Self::default()
        }
    }

    /// Flat-colored sprite
    pub fn colored(position: Vec3, dimensions: Vec2, color: Vec4) -> Self {
        Self {
            entity: Entity::new(position),
            dimensions,
            color,
            ..Self::default()
        }
    }

    /// Position shortcut
    pub fn position(&self) -> Vec3 {
        self.entity.position
    }

    /// Integrate position and rotation
    pub fn update(&mut self, dt: f32) {
        self.entity.update(dt);
        self.rotation.angle += dt * self.rotation.velocity;
    }

    /// Inclusive axis-aligned overlap test
    pub fn intersects(&self, other: &Self) -> bool {
        let (a, b) = (self.entity.position, other.entity.position);
        !(a.x > b.x + other.dimensions.x
            || a.x + self.dimensions.x < b.x
            || a.y > b.y + other.dimensions.y
            || a.y + self.dimensions.y < b.y)
    }

    /// Nothing would be visible: no texture and a fully transparent color
    pub fn is_blank(&self) -> bool {
        self.texture.file_name.is_empty() && self.color.w == 0.0
    }

    /// Regenerate the vertex buffer. Blank sprites produce no vertices.
    pub fn draw(&mut self) -> &[SpriteVertex] {
        self.vertices.clear();
        if self.is_blank() {
            return &self.vertices;
        }

        let mut corners = self.corners();
        if (self.rotation.angle as i32) % 360 != 0 {
            let p = self.entity.position;
            let center = Vec2::new(p.x + self.dimensions.x / 2.0, p.y + self.dimensions.y / 2.0);
            for corner in &mut corners {
                let r = rotate_about(Vec2::new(corner.x, corner.y), center, self.rotation.angle);
                corner.x = r.x;
                corner.y = r.y;
            }
        }

        let mode = if self.texture.file_name.is_empty() {
            MODE_COLOR
        } else {
            MODE_TEXTURE
        };
        let uvs = corner_uvs(self.texture.coords, self.reflect);
        self.fill(&corners, &uvs, mode);
        &self.vertices
    }

    /// Vertices produced by the last `draw`
    pub fn vertices(&self) -> &[SpriteVertex] {
        &self.vertices
    }

    fn corners(&self) -> [Vec3; 4] {
        let p = self.entity.position;
        let d = self.dimensions;
        [
            Vec3::new(p.x, p.y, p.z),
            Vec3::new(p.x + d.x, p.y, p.z),
            Vec3::new(p.x + d.x, p.y + d.y, p.z),
            Vec3::new(p.x, p.y + d.y, p.z),
        ]
    }

    fn fill(&mut self, corners: &[Vec3; 4], uvs: &[[f32; 2]; 4], mode: f32) {
        let color = [self.color.x, self.color.y, self.color.z, self.color.w];
        self.vertices.extend(corners.iter().zip(uvs).map(|(c, uv)| SpriteVertex {
            position: [c.x, c.y, c.z],
            uv: *uv,
            color,
            mode,
        }));
    }
}

/// UVs for the bottom-left, bottom-right, top-right, top-left corners.
/// Image rows run top-down, so the bottom edge samples `v + h`.
fn corner_uvs(c: Vec4, reflect: Reflect) -> [[f32; 2]; 4] {
    let (left, right) = if reflect.contains(Reflect::HORIZONTAL) {
        (c.x + c.z, c.x)
    } else {
        (c.x, c.x + c.z)
    };
    let (bottom, top) = if reflect.contains(Reflect::VERTICAL) {
        (c.y, c.y + c.w)
    } else {
        (c.y + c.w, c.y)
    };
    [[left, bottom], [right, bottom], [right, top], [left, top]]
}

/// One character quad placed by the text layout
#[derive(Debug, Clone, PartialEq)]
pub struct Glyph {
    /// Quad; `texture.file_name` is the glyph's atlas key
    pub sprite: Sprite,
}

impl Glyph {
    /// Glyph quad
    pub fn new(position: Vec3, dimensions: Vec2, texture_key: impl Into<String>, color: Vec4) -> Self {
        let mut sprite = Sprite::new(position, dimensions, texture_key);
        sprite.color = color;
        Self { sprite }
    }

    /// Regenerate vertices in glyph mode. Glyphs never rotate or mirror.
    pub fn draw(&mut self) -> &[SpriteVertex] {
        let corners = self.sprite.corners();
        let uvs = corner_uvs(self.sprite.texture.coords, Reflect::empty());
        self.sprite.vertices.clear();
        self.sprite.fill(&corners, &uvs, MODE_GLYPH);
        &self.sprite.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_blank_sprite_has_no_vertices() {
        let mut sprite = Sprite::colored(Vec3::zeros(), Vec2::new(10.0, 10.0), Vec4::new(1.0, 0.0, 0.0, 0.0));
        assert!(sprite.draw().is_empty());
    }

    #[test]
    fn test_colored_sprite_corners_and_mode() {
        let mut sprite = Sprite::colored(Vec3::new(1.0, 2.0, 0.5), Vec2::new(3.0, 4.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
        let v = sprite.draw();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].position, [1.0, 2.0, 0.5]);
        assert_eq!(v[1].position, [4.0, 2.0, 0.5]);
        assert_eq!(v[2].position, [4.0, 6.0, 0.5]);
        assert_eq!(v[3].position, [1.0, 6.0, 0.5]);
        assert!(v.iter().all(|v| v.mode == MODE_COLOR));
    }

    #[test]
    fn test_uvs_follow_reflection() {
        let mut sprite = Sprite::new(Vec3::zeros(), Vec2::new(1.0, 1.0), "a.png");
        sprite.texture.coords = Vec4::new(0.25, 0.0, 0.25, 1.0);
        let plain: Vec<_> = sprite.draw().iter().map(|v| v.uv).collect();
        assert_eq!(plain, vec![[0.25, 1.0], [0.5, 1.0], [0.5, 0.0], [0.25, 0.0]]);
        assert_eq!(sprite.vertices()[0].mode, MODE_TEXTURE);

        sprite.reflect = Reflect::HORIZONTAL;
        let h: Vec<_> = sprite.draw().iter().map(|v| v.uv).collect();
        assert_eq!(h, vec![[0.5, 1.0], [0.25, 1.0], [0.25, 0.0], [0.5, 0.0]]);

        sprite.reflect = Reflect::HORIZONTAL | Reflect::VERTICAL;
        let both: Vec<_> = sprite.draw().iter().map(|v| v.uv).collect();
        assert_eq!(both, vec![[0.5, 0.0], [0.25, 0.0], [0.25, 1.0], [0.5, 1.0]]);
    }

    #[test]
    fn test_rotation_about_centre() {
        let mut sprite = Sprite::colored(Vec3::zeros(), Vec2::new(2.0, 2.0), Vec4::new(1.0, 1.0, 1.0, 1.0));
        sprite.rotation.angle = 90.0;
        let v = sprite.draw();
        assert_relative_eq!(v[0].position[0], 2.0, epsilon = 1e-5);
        assert_relative_eq!(v[0].position[1], 0.0, epsilon = 1e-5);

        sprite.rotation.angle = 360.0;
        assert_eq!(sprite.draw()[0].position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_update_spins_and_moves() {
        let mut sprite = Sprite::default();
        sprite.entity.velocity = Vec2::new(1.0, 0.0);
        sprite.rotation.velocity = 45.0;
        sprite.update(2.0);
        assert_eq!(sprite.position().x, 2.0);
        assert_eq!(sprite.rotation.angle, 90.0);
    }

    #[test]
    fn test_intersects_is_inclusive() {
        let a = Sprite::new(Vec3::zeros(), Vec2::new(10.0, 10.0), "a.png");
        let touching = Sprite::new(Vec3::new(10.0, 10.0, 0.0), Vec2::new(5.0, 5.0), "b.png");
        let apart = Sprite::new(Vec3::new(10.5, 0.0, 0.0), Vec2::new(5.0, 5.0), "b.png");
        assert!(a.intersects(&touching));
        assert!(!a.intersects(&apart));
    }

    #[test]
    fn test_glyph_mode() {
        let mut glyph = Glyph::new(Vec3::zeros(), Vec2::new(4.0, 8.0), "font.ttf@65", Vec4::new(1.0, 1.0, 1.0, 1.0));
        let v = glyph.draw();
        assert_eq!(v.len(), 4);
        assert!(v.iter().all(|v| v.mode == MODE_GLYPH));
        assert_eq!(v[2].uv, [1.0, 0.0]);
    }
}
