//! In-memory graphics backend
//!
//! [`RecordingBackend`] implements [`GraphicsBackend`] without a GPU. Every
//! call is appended to a shared [`Recording`] that stays readable after the
//! backend has been boxed and handed to the renderer, which is how tests and
//! headless runs observe the batcher's output.

use crate::foundation::math::Vec3;
use crate::render::backend::{
    BackendError, BackendResult, GraphicsBackend, ProgramHandle, UniformLocation, UniformValue,
    VertexAttribute,
};
use crate::render::texture::{TextureFormat, TextureHandle};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A backend call, in issue order
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `initialize`
    Initialize(Vec3),
    /// `clear`
    Clear,
    /// `compile_program`
    CompileProgram(ProgramHandle),
    /// `use_program`
    UseProgram(ProgramHandle),
    /// `unuse_program`
    UnuseProgram,
    /// `release_program`
    ReleaseProgram(ProgramHandle),
    /// `upload_uniform`
    UploadUniform(UniformLocation, UniformValue),
    /// `create_texture`
    CreateTexture(TextureHandle, u32, u32),
    /// `bind_texture`
    BindTexture(TextureHandle),
    /// `delete_texture`
    DeleteTexture(TextureHandle),
    /// `draw_indexed`
    Draw,
    /// `shutdown`
    Shutdown,
}

/// One `draw_indexed` call with the state it was issued under
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    /// Program in use
    pub program: Option<ProgramHandle>,
    /// Texture bound
    pub texture: TextureHandle,
    /// Vertex floats
    pub vertices: Vec<f32>,
    /// Indices
    pub indices: Vec<u32>,
}

#[derive(Debug, Clone)]
struct Program {
    sources: String,
    uniforms: HashMap<String, UniformLocation>,
}

/// Everything the backend has seen
#[derive(Debug, Default)]
pub struct Recording {
    /// Calls in order
    pub commands: Vec<Command>,
    /// Draws in order
    pub draw_calls: Vec<DrawCall>,
    /// Live textures and their sizes
    pub textures: HashMap<TextureHandle, (u32, u32, TextureFormat)>,
    programs: HashMap<ProgramHandle, Program>,
    current_program: Option<ProgramHandle>,
    current_texture: TextureHandle,
    next_name: u32,
}

impl Recording {
    /// Programs not yet released
    pub fn live_programs(&self) -> usize {
        self.programs.len()
    }

    /// Forget commands and draws, keep resources
    pub fn clear_log(&mut self) {
        self.commands.clear();
        self.draw_calls.clear();
    }

    fn next_name(&mut self) -> u32 {
        self.next_name += 1;
        self.next_name
    }
}

/// Graphics backend that records instead of rendering
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    recording: Rc<RefCell<Recording>>,
    fail_compilation: bool,
}

impl RecordingBackend {
    /// New backend with an empty recording
    pub fn new() -> Self {
        Self::default()
    }

    /// Backend whose program compilation always fails
    pub fn failing_compilation() -> Self {
        Self {
            fail_compilation: true,
            ..Self::default()
        }
    }

    /// Shared handle onto the recording
    pub fn recording(&self) -> Rc<RefCell<Recording>> {
        Rc::clone(&self.recording)
    }
}

impl GraphicsBackend for RecordingBackend {
    fn initialize(&mut self, background: Vec3) -> BackendResult<()> {
        self.recording.borrow_mut().commands.push(Command::Initialize(background));
        Ok(())
    }

    fn clear(&mut self) {
        self.recording.borrow_mut().commands.push(Command::Clear);
    }

    fn compile_program(&mut self, vertex_source: &str, fragment_source: &str) -> BackendResult<ProgramHandle> {
        if self.fail_compilation {
            return Err(BackendError::CompilationFailed("compilation disabled".to_string()));
        }
        let mut rec = self.recording.borrow_mut();
        let handle = ProgramHandle(rec.next_name());
        rec.programs.insert(
            handle,
            Program {
                sources: format!("{vertex_source}\n{fragment_source}"),
                uniforms: HashMap::new(),
            },
        );
        rec.commands.push(Command::CompileProgram(handle));
        Ok(handle)
    }

    fn use_program(&mut self, program: ProgramHandle, _attributes: &[VertexAttribute], _stride: u32) {
        let mut rec = self.recording.borrow_mut();
        rec.current_program = Some(program);
        rec.commands.push(Command::UseProgram(program));
    }

    fn unuse_program(&mut self, _attribute_count: usize) {
        let mut rec = self.recording.borrow_mut();
        rec.current_program = None;
        rec.commands.push(Command::UnuseProgram);
    }

    fn release_program(&mut self, program: ProgramHandle) {
        let mut rec = self.recording.borrow_mut();
        rec.programs.remove(&program);
        rec.commands.push(Command::ReleaseProgram(program));
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let mut rec = self.recording.borrow_mut();
        let entry = rec.programs.get_mut(&program)?;
        if let Some(location) = entry.uniforms.get(name) {
            return Some(*location);
        }
        let declaration = format!(" {name};");
        let declared = entry
            .sources
            .lines()
            .map(str::trim)
            .any(|l| l.starts_with("uniform ") && l.ends_with(&declaration));
        if !declared {
            return None;
        }
        let location = UniformLocation(i32::try_from(entry.uniforms.len()).unwrap_or(i32::MAX));
        entry.uniforms.insert(name.to_string(), location);
        Some(location)
    }

    fn upload_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.recording
            .borrow_mut()
            .commands
            .push(Command::UploadUniform(location, value));
    }

    fn create_texture(
        &mut self,
        width: u32,
        height: u32,
        format: TextureFormat,
        pixels: &[u8],
    ) -> BackendResult<TextureHandle> {
        let expected = width as usize * height as usize * format.bytes_per_pixel();
        if pixels.len() < expected {
            return Err(BackendError::ResourceCreationFailed(format!(
                "{}x{} texture needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }
        let mut rec = self.recording.borrow_mut();
        let handle = TextureHandle(rec.next_name());
        rec.textures.insert(handle, (width, height, format));
        rec.commands.push(Command::CreateTexture(handle, width, height));
        Ok(handle)
    }

    fn bind_texture(&mut self, texture: TextureHandle) {
        let mut rec = self.recording.borrow_mut();
        rec.current_texture = texture;
        rec.commands.push(Command::BindTexture(texture));
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        let mut rec = self.recording.borrow_mut();
        rec.textures.remove(&texture);
        rec.commands.push(Command::DeleteTexture(texture));
    }

    fn draw_indexed(&mut self, vertices: &[f32], indices: &[u32]) -> BackendResult<()> {
        let mut rec = self.recording.borrow_mut();
        let call = DrawCall {
            program: rec.current_program,
            texture: rec.current_texture,
            vertices: vertices.to_vec(),
            indices: indices.to_vec(),
        };
        rec.draw_calls.push(call);
        rec.commands.push(Command::Draw);
        Ok(())
    }

    fn shutdown(&mut self) {
        let mut rec = self.recording.borrow_mut();
        rec.programs.clear();
        rec.textures.clear();
        rec.commands.push(Command::Shutdown);
    }
}
