//! Texture handles and the path-keyed texture cache

use std::collections::HashMap;

/// Backend texture name. `TextureHandle::NONE` means "no texture".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// Unbound / failed texture
    pub const NONE: Self = Self(0);

    /// Is this the null handle
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Pixel layout of uploaded texture data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// 4 bytes per pixel
    Rgba8,
    /// 1 byte per pixel, sampled through the red channel
    R8,
}

impl TextureFormat {
    /// Bytes per pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::R8 => 1,
        }
    }
}

/// Texture handles keyed by file path (or glyph key), filled on first miss
/// and never invalidated until cleared.
#[derive(Debug, Default)]
pub struct TextureCache {
    textures: HashMap<String, TextureHandle>,
}

impl TextureCache {
    /// Empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `key`
    pub fn get(&self, key: &str) -> Option<TextureHandle> {
        self.textures.get(key).copied()
    }

    /// Remember `handle` under `key`
    pub fn insert(&mut self, key: impl Into<String>, handle: TextureHandle) {
        self.textures.insert(key.into(), handle);
    }

    /// Number of cached textures
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// No textures cached
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Remove and return every handle
    pub fn drain(&mut self) -> impl Iterator<Item = TextureHandle> + '_ {
        self.textures.drain().map(|(_, handle)| handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_roundtrip() {
        let mut cache = TextureCache::new();
        assert_eq!(cache.get("a.png"), None);
        cache.insert("a.png", TextureHandle(3));
        assert_eq!(cache.get("a.png"), Some(TextureHandle(3)));
        assert_eq!(cache.drain().collect::<Vec<_>>(), vec![TextureHandle(3)]);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_none_handle() {
        assert!(TextureHandle::NONE.is_none());
        assert!(!TextureHandle(1).is_none());
        assert_eq!(TextureFormat::R8.bytes_per_pixel(), 1);
    }
}
