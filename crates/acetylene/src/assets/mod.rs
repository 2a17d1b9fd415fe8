//! Asset decoding
//!
//! The renderer only consumes raw pixel buffers and glyph metrics. Decoding
//! image and font files is delegated to [`TextureDecoder`] and [`FontDecoder`]
//! so tests can feed in-memory assets.

pub mod font_loader;
pub mod image_loader;

pub use font_loader::{FontdueDecoder, RasterFont, RasterGlyph};
pub use image_loader::{ImageData, ImageFileDecoder};

use thiserror::Error;

/// Asset management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Decodes an image file into RGBA pixels
pub trait TextureDecoder {
    /// Decode `path`. Rows are returned first row (top of the image) first.
    fn decode(&self, path: &str) -> Result<ImageData, AssetError>;
}

/// Rasterizes a font file into per-character bitmaps
pub trait FontDecoder {
    /// Rasterize character codes `0..128` of `path` at `pixel_size`
    fn decode(&self, path: &str, pixel_size: f32) -> Result<RasterFont, AssetError>;
}
