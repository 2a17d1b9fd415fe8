//! Single-line text placement inside a clip box

use crate::foundation::math::{Vec2, Vec3, Vec4};
use crate::render::text::font::Font;

/// Placement of text (or a label) relative to a box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Against the left edge
    Left,
    /// Against the right edge
    Right,
    /// Against the bottom edge
    Bottom,
    /// Against the top edge
    Top,
    /// Centred
    Center,
    /// Use the caller's position unchanged
    #[default]
    None,
}

/// A glyph quad produced by [`layout_line`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedGlyph {
    /// Character
    pub code: char,
    /// Bottom-left corner
    pub position: Vec3,
    /// Size
    pub dimensions: Vec2,
}

/// Lay out `text` on one line inside `bounds` (`x, y, w, h`).
///
/// The horizontal origin comes from `h_align` (or `position.x` for
/// [`Alignment::None`]) and is shifted left by the first glyph's bearing so
/// the visible left edge lines up. The baseline comes from `v_align` (or
/// `position.y`). Glyphs not fully inside `bounds` are dropped and the walk
/// stops at the first glyph that overflows the right edge. Characters the
/// font lacks are skipped.
pub fn layout_line(
    font: &Font,
    text: &str,
    position: Vec3,
    bounds: Vec4,
    scale: f32,
    h_align: Alignment,
    v_align: Alignment,
) -> Vec<PlacedGlyph> {
    let mut placed = Vec::new();
    let Some(first) = text.chars().next() else {
        return placed;
    };
    if font.is_empty() {
        return placed;
    }

    let width = font.text_width(text, scale);
    let height = font.text_height(scale);

    let mut x = match h_align {
        Alignment::Left => bounds.x,
        Alignment::Right => bounds.x + bounds.z - width,
        Alignment::Center => bounds.x + bounds.z / 2.0 - width / 2.0,
        _ => position.x,
    };
    if let Some(g) = font.glyph(first) {
        x -= g.bearing.x as f32 * scale;
    }

    let y = match v_align {
        Alignment::Bottom => bounds.y + font.min_bearing() * scale,
        Alignment::Top => bounds.y + bounds.w - height,
        Alignment::Center => bounds.y + bounds.w / 2.0 - height / 2.0,
        _ => position.y,
    };

    for code in text.chars() {
        let Some(g) = font.glyph(code) else {
            continue;
        };
        let gx = x + g.bearing.x as f32 * scale;
        let gy = y - (g.dimensions.y - g.bearing.y) as f32 * scale;
        let dims = Vec2::new(g.dimensions.x as f32 * scale, g.dimensions.y as f32 * scale);

        let inside = gx >= bounds.x
            && gx + dims.x <= bounds.x + bounds.z
            && gy >= bounds.y
            && gy + dims.y <= bounds.y + bounds.w;
        if inside {
            placed.push(PlacedGlyph {
                code,
                position: Vec3::new(gx, gy, position.z),
                dimensions: dims,
            });
        } else if gx + dims.x > bounds.x + bounds.z {
            break;
        }
        x += g.advance as f32 * scale;
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text::font::tests::mono_font;
    use approx::assert_relative_eq;

    fn xs(glyphs: &[PlacedGlyph]) -> Vec<f32> {
        glyphs.iter().map(|g| g.position.x).collect()
    }

    #[test]
    fn test_left_bottom() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "ab",
            Vec3::new(0.0, 0.0, 0.3),
            Vec4::new(0.0, 0.0, 100.0, 40.0),
            1.0,
            Alignment::Left,
            Alignment::Bottom,
        );
        assert_eq!(xs(&glyphs), vec![0.0, 12.0]);
        assert_eq!(glyphs[0].position.y, 0.0);
        assert_eq!(glyphs[0].position.z, 0.3);
        assert_eq!(glyphs[1].code, 'b');
    }

    #[test]
    fn test_overflow_truncates() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "abcd",
            Vec3::zeros(),
            Vec4::new(0.0, 0.0, 30.0, 40.0),
            1.0,
            Alignment::Left,
            Alignment::Bottom,
        );
        assert_eq!(glyphs.len(), 2);
    }

    #[test]
    fn test_centered_in_box() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "ab",
            Vec3::zeros(),
            Vec4::new(0.0, 0.0, 100.0, 40.0),
            1.0,
            Alignment::Center,
            Alignment::Center,
        );
        // width 24, height 20: origin x = 50 - 12 - 1, baseline y = 20 - 10
        assert_relative_eq!(glyphs[0].position.x, 38.0);
        assert_relative_eq!(glyphs[0].position.y, 5.0);
    }

    #[test]
    fn test_right_and_top() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "a",
            Vec3::zeros(),
            Vec4::new(0.0, 0.0, 100.0, 40.0),
            0.5,
            Alignment::Right,
            Alignment::Top,
        );
        assert_relative_eq!(glyphs[0].position.x, 94.0);
        assert_relative_eq!(glyphs[0].position.y, 27.5);
        assert_relative_eq!(glyphs[0].dimensions.y, 10.0);
    }

    #[test]
    fn test_unaligned_uses_position_and_skips_unknown() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "a\u{e9}b",
            Vec3::new(10.0, 10.0, 0.0),
            Vec4::new(0.0, 0.0, 100.0, 40.0),
            1.0,
            Alignment::None,
            Alignment::None,
        );
        assert_eq!(xs(&glyphs), vec![10.0, 22.0]);
        assert_eq!(glyphs[0].position.y, 5.0);
    }

    #[test]
    fn test_glyph_below_box_is_dropped_but_walk_continues() {
        let font = mono_font("mono.ttf");
        let glyphs = layout_line(
            &font,
            "ab",
            Vec3::new(0.0, 2.0, 0.0),
            Vec4::new(0.0, 0.0, 100.0, 40.0),
            1.0,
            Alignment::Left,
            Alignment::None,
        );
        assert!(glyphs.is_empty());
    }

    #[test]
    fn test_empty_text() {
        let font = mono_font("mono.ttf");
        assert!(layout_line(&font, "", Vec3::zeros(), Vec4::new(0.0, 0.0, 1.0, 1.0), 1.0, Alignment::Left, Alignment::Left).is_empty());
    }
}
