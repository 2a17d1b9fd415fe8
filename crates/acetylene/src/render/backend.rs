//! # Graphics Backend Abstraction
//!
//! The batching renderer never talks to a graphics API directly. Everything it
//! needs from the GPU (programs, uniforms, textures and one indexed draw per
//! batch) goes through [`GraphicsBackend`].
//!
//! The crate ships [`RecordingBackend`](crate::render::recording::RecordingBackend),
//! which keeps every command in memory; a windowed application plugs in a
//! backend that owns the real rendering context.

use crate::foundation::math::Vec3;
use crate::render::texture::{TextureFormat, TextureHandle};
use thiserror::Error;

/// Errors reported by a graphics backend
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// The rendering context could not be created
    #[error("Backend initialization failed: {0}")]
    InitializationFailed(String),

    /// A vertex or fragment program failed to compile or link
    #[error("Program compilation failed: {0}")]
    CompilationFailed(String),

    /// A GPU resource could not be created
    #[error("Resource creation failed: {0}")]
    ResourceCreationFailed(String),

    /// A draw call was rejected
    #[error("Draw failed: {0}")]
    DrawFailed(String),
}

/// Result type for backend operations
pub type BackendResult<T> = Result<T, BackendError>;

/// Compiled program name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProgramHandle(pub u32);

/// Uniform slot inside a program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub i32);

/// Value written to a uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int`
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec2`
    Vec2([f32; 2]),
    /// `vec3`
    Vec3([f32; 3]),
    /// `vec4`
    Vec4([f32; 4]),
    /// `mat4`, column-major
    Mat4([f32; 16]),
}

/// One vertex attribute of an interleaved float stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Component count
    pub size: u32,
    /// Byte offset from the start of the vertex
    pub offset: u32,
}

/// # Graphics Backend Trait
///
/// Defines the small command surface the sprite batcher needs.
///
/// ## Implementation Notes
///
/// Backends should:
/// - Be driven from a single thread, the one owning the rendering context
/// - Enable the given attribute layout when a program is put in use
/// - Treat `TextureHandle::NONE` as "unbind"
pub trait GraphicsBackend {
    /// Prepare the rendering context
    ///
    /// # Arguments
    /// * `background` - RGB clear color in range [0.0, 1.0]
    fn initialize(&mut self, background: Vec3) -> BackendResult<()>;

    /// Clear the framebuffer to the background color
    fn clear(&mut self);

    /// Compile and link a vertex/fragment program pair
    ///
    /// # Returns
    /// The program handle, or a `CompilationFailed` error with the driver log
    fn compile_program(&mut self, vertex_source: &str, fragment_source: &str) -> BackendResult<ProgramHandle>;

    /// Put a program in use and enable its vertex layout
    ///
    /// # Arguments
    /// * `program` - Program to use
    /// * `attributes` - Interleaved attribute layout, in location order
    /// * `stride` - Bytes per vertex
    fn use_program(&mut self, program: ProgramHandle, attributes: &[VertexAttribute], stride: u32);

    /// Stop using the current program and disable its attributes
    fn unuse_program(&mut self, attribute_count: usize);

    /// Free a program
    fn release_program(&mut self, program: ProgramHandle);

    /// Look up a uniform by name
    ///
    /// # Returns
    /// `None` if the program has no active uniform called `name`
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;

    /// Write a uniform of the program in use
    fn upload_uniform(&mut self, location: UniformLocation, value: UniformValue);

    /// Upload pixel data as a new texture
    ///
    /// # Arguments
    /// * `width`, `height` - Size in pixels
    /// * `format` - Pixel layout of `pixels`
    /// * `pixels` - Rows of pixel data, first row first
    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> BackendResult<TextureHandle>;

    /// Bind a texture for the next draw
    fn bind_texture(&mut self, texture: TextureHandle);

    /// Free a texture
    fn delete_texture(&mut self, texture: TextureHandle);

    /// Upload a batch and draw it as indexed triangles
    ///
    /// # Arguments
    /// * `vertices` - Interleaved vertex floats in the current program's layout
    /// * `indices` - Triangle list indices into `vertices`
    fn draw_indexed(&mut self, vertices: &[f32], indices: &[u32]) -> BackendResult<()>;

    /// Release everything the backend still owns
    fn shutdown(&mut self);
}
