//! 2D rendering: cameras, sprites, shaders, text and the batching renderer

pub mod animation;
pub mod backend;
pub mod camera;
pub mod entity;
pub mod graphics;
pub mod recording;
pub mod shader;
pub mod sprite;
pub mod text;
pub mod texture;

pub use animation::Animation;
pub use backend::{BackendError, GraphicsBackend};
pub use camera::{Camera, CameraScale};
pub use entity::Entity;
pub use graphics::{FrameStats, GraphicsManager, TextSubmission};
pub use recording::RecordingBackend;
pub use shader::{Shader, ShaderError};
pub use sprite::{Glyph, Reflect, Rotation, Sprite, SpriteVertex, Texture};
pub use text::{Alignment, Font};
pub use texture::TextureHandle;

slotmap::new_key_type! {
    /// Handle of a camera owned by the [`GraphicsManager`]
    pub struct CameraId;
    /// Handle of a shader owned by the [`GraphicsManager`]
    pub struct ShaderId;
}
