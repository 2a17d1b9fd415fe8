//! Concrete UI widgets
//!
//! [`Label`] is the building block: every other widget embeds one for its
//! background and caption and adds its own state on top. [`Carousel`] and
//! [`ListBox`] are composites that listen to their own child buttons and
//! switches and report a single value-set event upward.

pub mod button;
pub mod carousel;
pub mod label;
pub mod list_box;
pub mod password_box;
pub mod slider;
pub mod switch;
pub mod text_area;
pub mod text_box;

pub use button::Button;
pub use carousel::Carousel;
pub use label::Label;
pub use list_box::ListBox;
pub use password_box::PasswordBox;
pub use slider::Slider;
pub use switch::Switch;
pub use text_area::TextArea;
pub use text_box::TextBox;

use crate::context::Context;
use crate::foundation::math::Vec4;
use crate::render::Alignment;
use crate::ui::UIStyle;

/// Texture sub-rectangle `(x, y, w, h)` of column `index` in a strip of
/// `columns` equal frames
pub(crate) fn strip_coords(index: u32, columns: u32) -> Vec4 {
    let width = 1.0 / columns as f32;
    Vec4::new(index as f32 * width, 0.0, width, 1.0)
}

/// Pixel advance of each character of `line` in the style's font and scale.
///
/// The first character loses its left bearing, the way text layout starts a
/// line. Unknown glyphs, or a font that fails to load, advance nothing.
pub(crate) fn advances(ctx: &mut Context, style: &UIStyle, line: &str) -> Vec<f32> {
    let Some(font) = ctx.graphics.font(&style.font_file_name) else {
        return vec![0.0; line.chars().count()];
    };
    line.chars()
        .enumerate()
        .map(|(i, c)| {
            font.glyph(c).map_or(0.0, |g| {
                let bearing = if i == 0 { g.bearing.x } else { 0 };
                (g.advance - bearing) as f32 * style.text_scale
            })
        })
        .collect()
}

/// Line height of the style's font at its scale, 0 if the font is missing
pub(crate) fn line_height(ctx: &mut Context, style: &UIStyle) -> f32 {
    ctx.graphics
        .font(&style.font_file_name)
        .map_or(0.0, |f| f.text_height(style.text_scale))
}

/// Bottom edge of a `height`-tall cursor aligned inside the `y`/`h` span.
/// Anything but bottom or top centers it.
pub(crate) fn align_cursor(alignment: Alignment, y: f32, h: f32, height: f32) -> f32 {
    match alignment {
        Alignment::Bottom => y,
        Alignment::Top => y + h - height,
        _ => y + (h - height) / 2.0,
    }
}
