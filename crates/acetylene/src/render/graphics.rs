//! # Sprite batching renderer
//!
//! [`GraphicsManager`] collects a frame's sprites and text between
//! [`begin`](GraphicsManager::begin) and [`end`](GraphicsManager::end), then
//! draws them back to front with as few draw calls as possible.
//!
//! ## Frame lifecycle
//!
//! - `begin` clears the framebuffer and forgets last frame's submissions
//! - `submit*` regenerates each sprite's vertices and copies them into the
//!   frame list; text is laid out into per-shader glyph lists
//! - `end` turns the glyph lists into submissions, stable-sorts everything by
//!   depth and issues one indexed draw per contiguous run of equal shader and
//!   texture
//!
//! Textures and fonts are loaded on first use, cached by file name and only
//! freed by [`destroy`](GraphicsManager::destroy).

use crate::assets::{FontDecoder, TextureDecoder};
use crate::assets::font_loader::FONT_PIXEL_SIZE;
use crate::config::GraphicsConfig;
use crate::foundation::math::{IVec2, Mat4, Vec2, Vec3, Vec4};
use crate::render::backend::GraphicsBackend;
use crate::render::camera::Camera;
use crate::render::shader::{
    Shader, ShaderError, DEFAULT_CAMERA_UNIFORM, DEFAULT_FRAGMENT_SOURCE, DEFAULT_VERTEX_SOURCE,
};
use crate::render::sprite::{Glyph, Sprite, SpriteVertex, SPRITE_ATTRIBUTES};
use crate::render::text::{layout_line, Alignment, Font, GlyphMetrics};
use crate::render::texture::{TextureCache, TextureFormat, TextureHandle};
use crate::render::{CameraId, ShaderId};
use slotmap::SlotMap;
use std::collections::{BTreeMap, HashMap};

/// Index pattern of one quad
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// What `end` did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Quads drawn, glyphs included
    pub sprites: usize,
    /// Indexed draws issued
    pub draw_calls: usize,
    /// Shader switches after the first `begin`
    pub shader_changes: usize,
    /// Texture rebinds after the first bind
    pub texture_changes: usize,
}

/// A request to draw one line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextSubmission<'a> {
    /// Characters to draw
    pub text: &'a str,
    /// Pen position used by [`Alignment::None`]; `z` is the depth of every glyph
    pub position: Vec3,
    /// Clip box `(x, y, w, h)`
    pub bounds: Vec4,
    /// Multiplier on the 64 px raster size
    pub scale: f32,
    /// RGBA tint
    pub color: Vec4,
    /// Font file
    pub font_file: &'a str,
    /// Horizontal placement inside `bounds`
    pub h_align: Alignment,
    /// Vertical placement inside `bounds`
    pub v_align: Alignment,
}

#[derive(Debug, Clone)]
struct Entry {
    shader: ShaderId,
    texture: String,
    depth: f32,
    vertices: Vec<SpriteVertex>,
}

/// Batching 2D renderer
pub struct GraphicsManager {
    backend: Box<dyn GraphicsBackend>,
    texture_decoder: Box<dyn TextureDecoder>,
    font_decoder: Box<dyn FontDecoder>,
    cameras: SlotMap<CameraId, Camera>,
    shaders: SlotMap<ShaderId, Shader>,
    default_camera: CameraId,
    default_shader: ShaderId,
    textures: TextureCache,
    fonts: HashMap<String, Option<Font>>,
    entries: Vec<Entry>,
    glyphs: BTreeMap<ShaderId, Vec<Glyph>>,
}

impl GraphicsManager {
    /// Initialize the backend and build the default camera and shader
    pub fn new(
        mut backend: Box<dyn GraphicsBackend>,
        config: &GraphicsConfig,
        window_dims: Vec2,
        texture_decoder: Box<dyn TextureDecoder>,
        font_decoder: Box<dyn FontDecoder>,
    ) -> Result<Self, ShaderError> {
        backend.initialize(config.background_color)?;
        log::info!("Initialized graphics backend");

        let mut cameras = SlotMap::with_key();
        let default_camera = cameras.insert(Camera::new(window_dims));
        let mut shaders = SlotMap::with_key();
        let shader = Shader::new(
            backend.as_mut(),
            DEFAULT_VERTEX_SOURCE,
            DEFAULT_FRAGMENT_SOURCE,
            default_camera,
            DEFAULT_CAMERA_UNIFORM,
            &SPRITE_ATTRIBUTES,
        )?;
        let default_shader = shaders.insert(shader);
        log::info!("Compiled default shader");

        Ok(Self {
            backend,
            texture_decoder,
            font_decoder,
            cameras,
            shaders,
            default_camera,
            default_shader,
            textures: TextureCache::new(),
            fonts: HashMap::new(),
            entries: Vec::new(),
            glyphs: BTreeMap::new(),
        })
    }

    /// Advance the default camera
    pub fn update(&mut self, dt: f32, window_dims: Vec2) {
        if let Some(camera) = self.cameras.get_mut(self.default_camera) {
            camera.update(dt, window_dims);
        }
    }

    /// Clear the framebuffer and start a new frame
    pub fn begin(&mut self) {
        self.backend.clear();
        self.entries.clear();
        self.glyphs.clear();
    }

    /// Queue a sprite. Sprites that produce no vertices are skipped.
    pub fn submit(&mut self, sprite: &mut Sprite, shader: ShaderId) {
        let vertices = sprite.draw();
        if vertices.is_empty() {
            return;
        }
        let entry = Entry {
            shader,
            texture: sprite.texture.file_name.clone(),
            depth: sprite.entity.position.z,
            vertices: sprite.vertices().to_vec(),
        };
        self.entries.push(entry);
    }

    /// Queue several sprites with one shader
    pub fn submit_all<'a>(&mut self, sprites: impl IntoIterator<Item = &'a mut Sprite>, shader: ShaderId) {
        for sprite in sprites {
            self.submit(sprite, shader);
        }
    }

    /// Lay out a line of text and queue its glyphs. Empty text, a font that
    /// fails to load and a font without glyphs are all no-ops.
    pub fn submit_text(&mut self, text: &TextSubmission<'_>, shader: ShaderId) {
        if text.text.is_empty() {
            return;
        }
        let placed = {
            let Some(font) = self.font(text.font_file) else {
                return;
            };
            layout_line(
                font,
                text.text,
                text.position,
                text.bounds,
                text.scale,
                text.h_align,
                text.v_align,
            )
        };
        let list = self.glyphs.entry(shader).or_default();
        list.extend(placed.into_iter().map(|p| {
            Glyph::new(
                p.position,
                p.dimensions,
                Font::glyph_key(text.font_file, p.code),
                text.color,
            )
        }));
    }

    /// Sort the frame by depth and draw it
    pub fn end(&mut self) -> FrameStats {
        let glyphs = std::mem::take(&mut self.glyphs);
        for (shader, mut list) in glyphs {
            for glyph in &mut list {
                let vertices = glyph.draw().to_vec();
                self.entries.push(Entry {
                    shader,
                    texture: glyph.sprite.texture.file_name.clone(),
                    depth: glyph.sprite.entity.position.z,
                    vertices,
                });
            }
        }

        let mut stats = FrameStats::default();
        let mut entries = std::mem::take(&mut self.entries);
        if entries.is_empty() {
            return stats;
        }
        entries.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        stats.sprites = entries.len();

        let mut vertices: Vec<SpriteVertex> = Vec::new();
        let mut indices: Vec<u32> = Vec::new();
        let mut count: u32 = 0;

        let mut current_shader = entries[0].shader;
        self.begin_shader(current_shader);
        let mut current_texture = self.texture(&entries[0].texture);
        self.backend.bind_texture(current_texture);

        for entry in &entries {
            if entry.shader != current_shader {
                if count > 0 {
                    self.flush(&mut vertices, &mut indices, &mut stats);
                    count = 0;
                }
                self.end_shader(current_shader);
                current_shader = entry.shader;
                self.begin_shader(current_shader);
                stats.shader_changes += 1;
            }
            let texture = self.texture(&entry.texture);
            if texture != current_texture {
                if count > 0 {
                    self.flush(&mut vertices, &mut indices, &mut stats);
                    count = 0;
                }
                current_texture = texture;
                self.backend.bind_texture(current_texture);
                stats.texture_changes += 1;
            }
            vertices.extend_from_slice(&entry.vertices);
            indices.extend(QUAD_INDICES.iter().map(|i| i + 4 * count));
            count += 1;
        }
        if count > 0 {
            self.flush(&mut vertices, &mut indices, &mut stats);
        }
        self.end_shader(current_shader);

        entries.clear();
        self.entries = entries;
        stats
    }

    /// Texture for `file_name`, loading it on first use.
    ///
    /// Returns [`TextureHandle::NONE`] for an empty name or a file that fails
    /// to load; the failure is logged once and remembered.
    pub fn texture(&mut self, file_name: &str) -> TextureHandle {
        if file_name.is_empty() {
            return TextureHandle::NONE;
        }
        if let Some(handle) = self.textures.get(file_name) {
            return handle;
        }
        log::info!("Reading texture from \"{}\"", file_name);
        let handle = match self.texture_decoder.decode(file_name) {
            Ok(image) => self
                .backend
                .create_texture(image.width, image.height, TextureFormat::Rgba8, &image.data)
                .unwrap_or_else(|e| {
                    log::warn!("Failed to upload texture \"{}\": {}", file_name, e);
                    TextureHandle::NONE
                }),
            Err(e) => {
                log::warn!("Failed to load texture \"{}\": {}", file_name, e);
                TextureHandle::NONE
            }
        };
        self.textures.insert(file_name, handle);
        handle
    }

    /// Font for `file_name`, rasterizing it on first use
    pub fn font(&mut self, file_name: &str) -> Option<&Font> {
        if !self.fonts.contains_key(file_name) {
            let font = self.load_font(file_name);
            self.fonts.insert(file_name.to_string(), font);
        }
        self.fonts.get(file_name).and_then(Option::as_ref)
    }

    /// Camera the default shader renders through
    pub fn default_camera(&self) -> CameraId {
        self.default_camera
    }

    /// Shader used when a caller has no preference
    pub fn default_shader(&self) -> ShaderId {
        self.default_shader
    }

    /// Make `shader` the default
    pub fn set_default_shader(&mut self, shader: ShaderId) -> bool {
        if !self.shaders.contains_key(shader) {
            return false;
        }
        self.default_shader = shader;
        true
    }

    /// Register a camera
    pub fn add_camera(&mut self, camera: Camera) -> CameraId {
        self.cameras.insert(camera)
    }

    /// Camera by id
    pub fn camera(&self, id: CameraId) -> Option<&Camera> {
        self.cameras.get(id)
    }

    /// Mutable camera by id
    pub fn camera_mut(&mut self, id: CameraId) -> Option<&mut Camera> {
        self.cameras.get_mut(id)
    }

    /// Drop a camera. Refused for the default camera and for cameras a
    /// shader still renders through.
    pub fn remove_camera(&mut self, id: CameraId) -> bool {
        if id == self.default_camera || self.shaders.values().any(|s| s.camera() == id) {
            return false;
        }
        self.cameras.remove(id).is_some()
    }

    /// Compile and register a shader
    pub fn add_shader(
        &mut self,
        vertex_source: &str,
        fragment_source: &str,
        camera: CameraId,
        camera_uniform: &str,
        attribute_sizes: &[u32],
    ) -> Result<ShaderId, ShaderError> {
        let shader = Shader::new(
            self.backend.as_mut(),
            vertex_source,
            fragment_source,
            camera,
            camera_uniform,
            attribute_sizes,
        )?;
        Ok(self.shaders.insert(shader))
    }

    /// Register a copy of `base` that renders through `camera`
    pub fn derive_shader(&mut self, base: ShaderId, camera: CameraId) -> Option<ShaderId> {
        if !self.cameras.contains_key(camera) {
            return None;
        }
        let shader = self.shaders.get(base)?.with_camera(camera);
        Some(self.shaders.insert(shader))
    }

    /// Shader by id
    pub fn shader(&self, id: ShaderId) -> Option<&Shader> {
        self.shaders.get(id)
    }

    /// Camera a shader renders through
    pub fn shader_camera(&self, id: ShaderId) -> Option<&Camera> {
        self.shaders.get(id).and_then(|s| self.cameras.get(s.camera()))
    }

    /// Drop a shader, freeing its program once no other shader shares it.
    /// The default shader cannot be removed.
    pub fn remove_shader(&mut self, id: ShaderId) -> bool {
        if id == self.default_shader {
            return false;
        }
        let Some(shader) = self.shaders.remove(id) else {
            return false;
        };
        if !self.shaders.values().any(|s| s.program() == shader.program()) {
            shader.release(self.backend.as_mut());
        }
        true
    }

    /// Backend for direct uniform uploads
    pub fn backend_mut(&mut self) -> &mut dyn GraphicsBackend {
        self.backend.as_mut()
    }

    /// Free every texture, program and font and shut the backend down
    pub fn destroy(&mut self) {
        log::info!("Destroying renderer");
        let mut count = 0;
        for handle in self.textures.drain() {
            if !handle.is_none() {
                self.backend.delete_texture(handle);
                count += 1;
            }
        }
        log::info!("Deleted {} textures", count);

        let mut programs: Vec<_> = self.shaders.values().map(Shader::program).collect();
        programs.sort_unstable();
        programs.dedup();
        for program in programs {
            self.backend.release_program(program);
        }
        log::info!("Freed {} fonts", self.fonts.len());
        self.fonts.clear();
        self.entries.clear();
        self.glyphs.clear();
        self.backend.shutdown();
    }

    fn load_font(&mut self, file_name: &str) -> Option<Font> {
        log::info!("Loading font \"{}\"", file_name);
        let raster = match self.font_decoder.decode(file_name, FONT_PIXEL_SIZE) {
            Ok(raster) => raster,
            Err(e) => {
                log::warn!("Failed to load font \"{}\": {}", file_name, e);
                return None;
            }
        };

        let mut font = Font::new(file_name);
        for glyph in raster.glyphs {
            let texture = match self.backend.create_texture(
                glyph.width,
                glyph.height,
                TextureFormat::R8,
                &glyph.coverage,
            ) {
                Ok(texture) => texture,
                Err(e) => {
                    log::warn!("Failed to load character {:?} for font \"{}\": {}", glyph.code, file_name, e);
                    continue;
                }
            };
            self.textures.insert(Font::glyph_key(file_name, glyph.code), texture);
            font.insert(
                glyph.code,
                GlyphMetrics {
                    texture,
                    dimensions: IVec2::new(
                        i32::try_from(glyph.width).unwrap_or(i32::MAX),
                        i32::try_from(glyph.height).unwrap_or(i32::MAX),
                    ),
                    bearing: glyph.bearing,
                    advance: glyph.advance,
                },
            );
        }
        Some(font)
    }

    fn begin_shader(&mut self, id: ShaderId) {
        let Some(shader) = self.shaders.get(id) else {
            log::warn!("Submitted with unknown shader {:?}", id);
            return;
        };
        let matrix = self
            .cameras
            .get(shader.camera())
            .map_or_else(Mat4::identity, |c| *c.matrix());
        shader.begin(self.backend.as_mut(), &matrix);
    }

    fn end_shader(&mut self, id: ShaderId) {
        if let Some(shader) = self.shaders.get(id) {
            shader.end(self.backend.as_mut());
        }
    }

    fn flush(&mut self, vertices: &mut Vec<SpriteVertex>, indices: &mut Vec<u32>, stats: &mut FrameStats) {
        if let Err(e) = self
            .backend
            .draw_indexed(bytemuck::cast_slice(vertices.as_slice()), indices)
        {
            log::warn!("Draw call failed: {}", e);
        }
        stats.draw_calls += 1;
        vertices.clear();
        indices.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::assets::{AssetError, ImageData, RasterFont, RasterGlyph};
    use crate::render::recording::{Recording, RecordingBackend};
    use crate::render::sprite::FLOATS_PER_VERTEX;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Every `.png` path decodes to a 2x2 white image
    pub(crate) struct PngStub;

    impl TextureDecoder for PngStub {
        fn decode(&self, path: &str) -> Result<ImageData, AssetError> {
            if path.ends_with(".png") {
                Ok(ImageData::solid_color(2, 2, [255; 4]))
            } else {
                Err(AssetError::NotFound(path.to_string()))
            }
        }
    }

    /// Every `.ttf` path rasterizes printable ASCII as 10x20 glyphs with an
    /// advance of 12 and bearing (1, 15)
    pub(crate) struct MonoFontStub;

    impl FontDecoder for MonoFontStub {
        fn decode(&self, path: &str, _pixel_size: f32) -> Result<RasterFont, AssetError> {
            if !path.ends_with(".ttf") {
                return Err(AssetError::NotFound(path.to_string()));
            }
            let glyphs = (' '..='~')
                .map(|code| RasterGlyph {
                    code,
                    width: 10,
                    height: 20,
                    bearing: IVec2::new(1, 15),
                    advance: 12,
                    coverage: vec![255; 200],
                })
                .collect();
            Ok(RasterFont { glyphs })
        }
    }

    pub(crate) fn graphics() -> (GraphicsManager, Rc<RefCell<Recording>>) {
        let backend = RecordingBackend::new();
        let recording = backend.recording();
        let graphics = GraphicsManager::new(
            Box::new(backend),
            &GraphicsConfig::default(),
            Vec2::new(800.0, 600.0),
            Box::new(PngStub),
            Box::new(MonoFontStub),
        )
        .unwrap();
        (graphics, recording)
    }

    fn quad(x: f32, z: f32, texture: &str) -> Sprite {
        Sprite::new(Vec3::new(x, 0.0, z), Vec2::new(1.0, 1.0), texture)
    }

    #[test]
    fn test_blank_sprite_adds_nothing() {
        let (mut graphics, recording) = graphics();
        let shader = graphics.default_shader();
        graphics.begin();
        let mut blank = Sprite::colored(Vec3::zeros(), Vec2::new(4.0, 4.0), Vec4::zeros());
        graphics.submit(&mut blank, shader);
        let stats = graphics.end();
        assert_eq!(stats, FrameStats::default());
        assert!(recording.borrow().draw_calls.is_empty());
    }

    #[test]
    fn test_one_texture_is_one_draw_call() {
        let (mut graphics, recording) = graphics();
        let shader = graphics.default_shader();
        graphics.begin();
        let mut sprites: Vec<Sprite> = (0..5).map(|i| quad(i as f32, 0.0, "a.png")).collect();
        graphics.submit_all(sprites.iter_mut(), shader);
        let stats = graphics.end();
        assert_eq!(stats.draw_calls, 1);
        assert_eq!(stats.sprites, 5);

        let rec = recording.borrow();
        let call = &rec.draw_calls[0];
        assert_eq!(call.vertices.len(), 5 * 4 * FLOATS_PER_VERTEX);
        assert_eq!(&call.indices[6..12], &[4, 5, 6, 6, 7, 4]);
    }

    #[test]
    fn test_texture_change_splits_batch() {
        let (mut graphics, _recording) = graphics();
        let shader = graphics.default_shader();
        graphics.begin();
        let mut sprites = vec![quad(0.0, 0.0, "a.png"), quad(1.0, 0.0, "a.png"), quad(2.0, 0.0, "b.png")];
        graphics.submit_all(sprites.iter_mut(), shader);
        let stats = graphics.end();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.texture_changes, 1);
    }

    #[test]
    fn test_depth_sort_is_stable() {
        let (mut graphics, recording) = graphics();
        let shader = graphics.default_shader();
        graphics.begin();
        let mut front = quad(100.0, 0.5, "a.png");
        let mut first = quad(1.0, 0.0, "a.png");
        let mut second = quad(2.0, 0.0, "a.png");
        graphics.submit(&mut front, shader);
        graphics.submit(&mut first, shader);
        graphics.submit(&mut second, shader);
        graphics.end();

        let rec = recording.borrow();
        let xs: Vec<f32> = rec.draw_calls[0]
            .vertices
            .chunks(FLOATS_PER_VERTEX * 4)
            .map(|quad| quad[0])
            .collect();
        assert_eq!(xs, vec![1.0, 2.0, 100.0]);
    }

    #[test]
    fn test_shader_change_splits_batch() {
        let (mut graphics, _recording) = graphics();
        let camera = graphics.add_camera(Camera::new(Vec2::new(800.0, 600.0)));
        let ui = graphics.derive_shader(graphics.default_shader(), camera).unwrap();
        let default = graphics.default_shader();
        graphics.begin();
        graphics.submit(&mut quad(0.0, 0.0, "a.png"), default);
        graphics.submit(&mut quad(0.0, 0.1, "a.png"), ui);
        let stats = graphics.end();
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.shader_changes, 1);
        assert_eq!(stats.texture_changes, 0);
    }

    #[test]
    fn test_missing_texture_is_none_and_cached() {
        let (mut graphics, recording) = graphics();
        assert_eq!(graphics.texture(""), TextureHandle::NONE);
        assert_eq!(graphics.texture("missing.jpg"), TextureHandle::NONE);
        let first = graphics.texture("a.png");
        assert_eq!(graphics.texture("a.png"), first);
        assert_eq!(recording.borrow().textures.len(), 1);
    }

    #[test]
    fn test_text_produces_glyph_quads() {
        let (mut graphics, recording) = graphics();
        let shader = graphics.default_shader();
        graphics.begin();
        graphics.submit_text(
            &TextSubmission {
                text: "hi",
                position: Vec3::new(0.0, 0.0, 0.2),
                bounds: Vec4::new(0.0, 0.0, 200.0, 50.0),
                scale: 1.0,
                color: Vec4::new(1.0, 1.0, 1.0, 1.0),
                font_file: "mono.ttf",
                h_align: Alignment::Left,
                v_align: Alignment::Bottom,
            },
            shader,
        );
        let stats = graphics.end();
        assert_eq!(stats.sprites, 2);
        // every glyph has its own texture
        assert_eq!(stats.draw_calls, 2);
        let rec = recording.borrow();
        assert_eq!(rec.draw_calls[0].vertices[FLOATS_PER_VERTEX - 1], 2.0);
    }

    #[test]
    fn test_missing_font_is_a_no_op() {
        let (mut graphics, _recording) = graphics();
        let shader = graphics.default_shader();
        assert!(graphics.font("missing.otf").is_none());
        graphics.begin();
        graphics.submit_text(
            &TextSubmission {
                text: "hi",
                position: Vec3::zeros(),
                bounds: Vec4::new(0.0, 0.0, 200.0, 50.0),
                scale: 1.0,
                color: Vec4::new(1.0, 1.0, 1.0, 1.0),
                font_file: "missing.otf",
                h_align: Alignment::Left,
                v_align: Alignment::Bottom,
            },
            shader,
        );
        assert_eq!(graphics.end().sprites, 0);
    }

    #[test]
    fn test_font_metrics_loaded() {
        let (mut graphics, _recording) = graphics();
        let font = graphics.font("mono.ttf").unwrap();
        assert_eq!(font.len(), 95);
        assert_eq!(font.min_bearing(), 5.0);
        assert_eq!(font.max_bearing(), 15.0);
        assert_eq!(font.glyph('A').map(|g| g.advance), Some(12));
    }

    #[test]
    fn test_shared_program_released_last() {
        let (mut graphics, recording) = graphics();
        let camera = graphics.add_camera(Camera::new(Vec2::new(800.0, 600.0)));
        let derived = graphics.derive_shader(graphics.default_shader(), camera).unwrap();
        assert!(!graphics.remove_camera(camera));
        assert!(graphics.remove_shader(derived));
        assert_eq!(recording.borrow().live_programs(), 1);
        assert!(!graphics.remove_shader(graphics.default_shader()));
        assert!(graphics.remove_camera(camera));
    }

    #[test]
    fn test_destroy_frees_textures() {
        let (mut graphics, recording) = graphics();
        graphics.texture("a.png");
        graphics.font("mono.ttf");
        graphics.destroy();
        let rec = recording.borrow();
        assert!(rec.textures.is_empty());
        assert_eq!(rec.live_programs(), 0);
    }
}
