//! Image decoding for sprite textures

use crate::assets::{AssetError, TextureDecoder};
use std::path::Path;

/// Decoded RGBA8 image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Pixel bytes, 4 per pixel, top row first
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageData {
    /// Decode an image file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path = path.as_ref();
        log::debug!("Loading image from: {:?}", path);

        if !path.exists() {
            return Err(AssetError::NotFound(path.display().to_string()));
        }
        let img = image::open(path)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path.display(), e)))?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Decode an in-memory image file
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("image from bytes: {}", e)))?;
        Ok(Self::from_rgba(img.to_rgba8()))
    }

    /// Single-color image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let data = color.repeat(width as usize * height as usize);
        Self { data, width, height }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    fn from_rgba(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        log::debug!("Decoded image {}x{}", width, height);
        Self {
            data: rgba.into_raw(),
            width,
            height,
        }
    }
}

/// [`TextureDecoder`] reading image files from disk with the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileDecoder;

impl TextureDecoder for ImageFileDecoder {
    fn decode(&self, path: &str) -> Result<ImageData, AssetError> {
        ImageData::from_file(path)
    }
}
