//! Text rendering: per-character glyph textures and single-line layout

pub mod font;
pub mod layout;

pub use font::{Font, GlyphMetrics};
pub use layout::{layout_line, Alignment, PlacedGlyph};
