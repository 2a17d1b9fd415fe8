//! Font rasterization with `fontdue`

use crate::assets::{AssetError, FontDecoder};
use crate::foundation::math::IVec2;
use fontdue::{Font, FontSettings};

/// Character codes rasterized for every font
pub const GLYPH_CODES: std::ops::Range<u32> = 0..128;

/// Pixel height fonts are rasterized at
pub const FONT_PIXEL_SIZE: f32 = 64.0;

/// One rasterized character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterGlyph {
    /// Character
    pub code: char,
    /// Bitmap width in pixels
    pub width: u32,
    /// Bitmap height in pixels
    pub height: u32,
    /// Offset from the pen position to the bitmap's left edge (x) and from
    /// the baseline up to its top edge (y)
    pub bearing: IVec2,
    /// Pen advance in whole pixels
    pub advance: i32,
    /// Coverage bytes, one per pixel, top row first
    pub coverage: Vec<u8>,
}

/// Every rasterized character of a font
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RasterFont {
    /// Glyphs in code order
    pub glyphs: Vec<RasterGlyph>,
}

/// [`FontDecoder`] reading TrueType/OpenType files from disk
#[derive(Debug, Clone, Copy, Default)]
pub struct FontdueDecoder;

impl FontdueDecoder {
    /// Rasterize font file bytes
    pub fn decode_bytes(bytes: &[u8], pixel_size: f32) -> Result<RasterFont, AssetError> {
        let settings = FontSettings {
            scale: pixel_size,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(bytes, settings)
            .map_err(|e| AssetError::InvalidData(format!("fontdue error: {}", e)))?;

        let glyphs = GLYPH_CODES
            .filter_map(char::from_u32)
            .map(|code| {
                let (metrics, coverage) = font.rasterize(code, pixel_size);
                let height = i32::try_from(metrics.height).unwrap_or(i32::MAX);
                RasterGlyph {
                    code,
                    width: u32::try_from(metrics.width).unwrap_or(0),
                    height: u32::try_from(metrics.height).unwrap_or(0),
                    bearing: IVec2::new(metrics.xmin, metrics.ymin + height),
                    advance: metrics.advance_width as i32,
                    coverage,
                }
            })
            .collect();
        Ok(RasterFont { glyphs })
    }
}

impl FontDecoder for FontdueDecoder {
    fn decode(&self, path: &str, pixel_size: f32) -> Result<RasterFont, AssetError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AssetError::NotFound(path.to_string()),
            _ => AssetError::LoadFailed(format!("{}: {}", path, e)),
        })?;
        let font = Self::decode_bytes(&bytes, pixel_size)?;
        log::info!("Rasterized {} glyphs from {} at {}px", font.glyphs.len(), path, pixel_size);
        Ok(font)
    }
}
