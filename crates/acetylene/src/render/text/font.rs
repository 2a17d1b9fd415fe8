//! Loaded fonts: glyph metrics plus the texture backing each character

use crate::foundation::math::IVec2;
use crate::render::texture::TextureHandle;
use std::collections::HashMap;

/// Metrics and texture of one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphMetrics {
    /// Bitmap texture
    pub texture: TextureHandle,
    /// Bitmap size in pixels
    pub dimensions: IVec2,
    /// Left edge offset (x) and height above the baseline (y)
    pub bearing: IVec2,
    /// Pen advance in whole pixels
    pub advance: i32,
}

/// A font rasterized at a fixed pixel size.
///
/// `min_bearing` is the deepest descent below the baseline and `max_bearing`
/// the tallest rise above it, over every loaded glyph. Their sum is the line
/// height used for vertical alignment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Font {
    file_name: String,
    glyphs: HashMap<char, GlyphMetrics>,
    min_bearing: f32,
    max_bearing: f32,
}

impl Font {
    /// Empty font for `file_name`
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Texture cache key of one glyph: `"<font file>@<code>"`
    pub fn glyph_key(file_name: &str, code: char) -> String {
        format!("{}@{}", file_name, u32::from(code))
    }

    /// Add a glyph and fold it into the bearing extremes
    pub fn insert(&mut self, code: char, metrics: GlyphMetrics) {
        let descent = (metrics.dimensions.y - metrics.bearing.y) as f32;
        let rise = metrics.bearing.y as f32;
        self.min_bearing = self.min_bearing.max(descent);
        self.max_bearing = self.max_bearing.max(rise);
        self.glyphs.insert(code, metrics);
    }

    /// Source file
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Metrics of `code`, if the font has it
    pub fn glyph(&self, code: char) -> Option<&GlyphMetrics> {
        self.glyphs.get(&code)
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// No glyphs were loaded
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Deepest descent below the baseline
    pub fn min_bearing(&self) -> f32 {
        self.min_bearing
    }

    /// Tallest rise above the baseline
    pub fn max_bearing(&self) -> f32 {
        self.max_bearing
    }

    /// Summed advance of `text` times `scale`; unknown characters count 0
    pub fn text_width(&self, text: &str, scale: f32) -> f32 {
        text.chars()
            .filter_map(|c| self.glyph(c))
            .map(|g| g.advance as f32)
            .sum::<f32>()
            * scale
    }

    /// Line height times `scale`
    pub fn text_height(&self, scale: f32) -> f32 {
        (self.min_bearing + self.max_bearing) * scale
    }

    /// Every glyph texture
    pub fn textures(&self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.glyphs.values().map(|g| g.texture)
    }
}
