//! Vertex/fragment programs with a fixed float-attribute layout and a bound camera

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};
use crate::render::backend::{BackendError, GraphicsBackend, ProgramHandle, UniformValue, VertexAttribute};
use crate::render::CameraId;
use thiserror::Error;

/// Errors raised while building a shader
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShaderError {
    /// The backend rejected the sources
    #[error(transparent)]
    Backend(#[from] BackendError),

    /// No vertex attributes were declared
    #[error("Shader declares no vertex attributes")]
    EmptyLayout,
}

/// Default vertex program: camera transform, pass-through of uv, color and mode
pub const DEFAULT_VERTEX_SOURCE: &str = "#version 330 core
layout (location = 0) in vec3 vertexPosition;
layout (location = 1) in vec2 vertexTexturePosition;
layout (location = 2) in vec4 vertexColor;
layout (location = 3) in float mode;
uniform mat4 cameraMatrix;
out vec2 fragmentTexturePosition;
out vec4 fragmentColor;
out float fragmentMode;
void main() {
    gl_Position = cameraMatrix * vec4(vertexPosition, 1.0);
    fragmentTexturePosition = vertexTexturePosition;
    fragmentColor = vertexColor;
    fragmentMode = mode;
}
";

/// Default fragment program. Mode 0 samples the texture, 1 uses the vertex
/// color, 2 treats the red channel as coverage tinted by the vertex color.
pub const DEFAULT_FRAGMENT_SOURCE: &str = "#version 330 core
in vec2 fragmentTexturePosition;
in vec4 fragmentColor;
in float fragmentMode;
out vec4 FragmentColor;
uniform sampler2D textureSampler;
void main() {
    if (fragmentMode >= 2.0) {
        vec4 textureColor = vec4(1.0, 1.0, 1.0, texture(textureSampler, fragmentTexturePosition).r);
        FragmentColor = fragmentColor * textureColor;
    } else {
        FragmentColor = (1.0 - fragmentMode) * texture(textureSampler, fragmentTexturePosition)
            + fragmentMode * fragmentColor;
    }
}
";

/// Name of the camera matrix uniform in the default program
pub const DEFAULT_CAMERA_UNIFORM: &str = "cameraMatrix";

/// A compiled program, its vertex layout and the camera it renders through
#[derive(Debug, Clone, PartialEq)]
pub struct Shader {
    program: ProgramHandle,
    attributes: Vec<VertexAttribute>,
    stride: u32,
    camera: CameraId,
    camera_uniform: String,
}

impl Shader {
    /// Compile a program whose vertices are tightly packed floats.
    ///
    /// # Arguments
    /// * `attribute_sizes` - Float count of each attribute, in location order
    /// * `camera_uniform` - `mat4` uniform receiving the camera matrix, empty for none
    pub fn new(
        backend: &mut dyn GraphicsBackend,
        vertex_source: &str,
        fragment_source: &str,
        camera: CameraId,
        camera_uniform: &str,
        attribute_sizes: &[u32],
    ) -> Result<Self, ShaderError> {
        if attribute_sizes.is_empty() {
            return Err(ShaderError::EmptyLayout);
        }
        let program = backend.compile_program(vertex_source, fragment_source).map_err(|e| {
            log::warn!("Failed to compile shader: {}", e);
            e
        })?;
        let (attributes, stride) = layout(attribute_sizes);
        log::info!("Compiled shader program {} with stride {}", program.0, stride);
        Ok(Self {
            program,
            attributes,
            stride,
            camera,
            camera_uniform: camera_uniform.to_string(),
        })
    }

    /// Same program and layout, rendered through another camera
    pub fn with_camera(&self, camera: CameraId) -> Self {
        Self {
            camera,
            ..self.clone()
        }
    }

    /// Put the program in use and upload the camera matrix
    pub fn begin(&self, backend: &mut dyn GraphicsBackend, camera_matrix: &Mat4) {
        backend.use_program(self.program, &self.attributes, self.stride);
        if !self.camera_uniform.is_empty() && !self.upload_mat4(backend, &self.camera_uniform, camera_matrix) {
            log::debug!("Shader {} has no uniform {}", self.program.0, self.camera_uniform);
        }
    }

    /// Stop using the program
    pub fn end(&self, backend: &mut dyn GraphicsBackend) {
        backend.unuse_program(self.attributes.len());
    }

    /// Free the program
    pub fn release(&self, backend: &mut dyn GraphicsBackend) {
        log::info!("Destroying shader program {}", self.program.0);
        backend.release_program(self.program);
    }

    /// Backend program
    pub fn program(&self) -> ProgramHandle {
        self.program
    }

    /// Attribute layout
    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    /// Bytes per vertex
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Camera this shader renders through
    pub fn camera(&self) -> CameraId {
        self.camera
    }

    /// Rebind to another camera
    pub fn set_camera(&mut self, camera: CameraId) {
        self.camera = camera;
    }

    /// Name of the camera matrix uniform
    pub fn camera_uniform(&self) -> &str {
        &self.camera_uniform
    }

    /// Upload an `int` uniform; `false` if the program has no such uniform
    pub fn upload_int(&self, backend: &mut dyn GraphicsBackend, name: &str, value: i32) -> bool {
        self.upload(backend, name, UniformValue::Int(value))
    }

    /// Upload a `float` uniform
    pub fn upload_float(&self, backend: &mut dyn GraphicsBackend, name: &str, value: f32) -> bool {
        self.upload(backend, name, UniformValue::Float(value))
    }

    /// Upload a `vec2` uniform
    pub fn upload_vec2(&self, backend: &mut dyn GraphicsBackend, name: &str, value: &Vec2) -> bool {
        self.upload(backend, name, UniformValue::Vec2([value.x, value.y]))
    }

    /// Upload a `vec3` uniform
    pub fn upload_vec3(&self, backend: &mut dyn GraphicsBackend, name: &str, value: &Vec3) -> bool {
        self.upload(backend, name, UniformValue::Vec3([value.x, value.y, value.z]))
    }

    /// Upload a `vec4` uniform
    pub fn upload_vec4(&self, backend: &mut dyn GraphicsBackend, name: &str, value: &Vec4) -> bool {
        self.upload(backend, name, UniformValue::Vec4([value.x, value.y, value.z, value.w]))
    }

    /// Upload a `mat4` uniform
    pub fn upload_mat4(&self, backend: &mut dyn GraphicsBackend, name: &str, value: &Mat4) -> bool {
        let mut columns = [0.0; 16];
        columns.copy_from_slice(value.as_slice());
        self.upload(backend, name, UniformValue::Mat4(columns))
    }

    fn upload(&self, backend: &mut dyn GraphicsBackend, name: &str, value: UniformValue) -> bool {
        let Some(location) = backend.uniform_location(self.program, name) else {
            return false;
        };
        backend.upload_uniform(location, value);
        true
    }
}

/// Offsets and stride for tightly packed float attributes
fn layout(sizes: &[u32]) -> (Vec<VertexAttribute>, u32) {
    let mut offset = 0;
    let attributes = sizes
        .iter()
        .map(|&size| {
            let attribute = VertexAttribute { size, offset };
            offset += size * 4;
            attribute
        })
        .collect();
    (attributes, offset)
}
