//! Demo scenes and what they share

pub mod game;
pub mod options;
pub mod title;

pub use game::GameScene;
pub use options::OptionsScene;
pub use title::TitleScene;

use crate::assets::{BUTTON_TEXTURE, FONT};
use acetylene::prelude::*;
use acetylene::render::CameraId;

/// Title screen
pub const TITLE: SceneId = SceneId(0);
/// Options editor
pub const OPTIONS: SceneId = SceneId(1);
/// The coin collecting game
pub const GAME: SceneId = SceneId(2);

/// A camera whose view maps world units onto window pixels, and the shader
/// drawing through it. UI and menu sprites are drawn with it so they ignore
/// the game camera.
#[derive(Debug, Clone, Copy)]
pub struct UiView {
    camera: CameraId,
    shader: ShaderId,
}

impl UiView {
    /// Add the camera and derive its shader from the default one
    pub fn new(ctx: &mut Context) -> Option<Self> {
        let dims = ctx.window_dims();
        let camera = ctx
            .graphics
            .add_camera(Camera::with_position(Vec3::new(dims.x / 2.0, dims.y / 2.0, 0.0), dims));
        let base = ctx.graphics.default_shader();
        let Some(shader) = ctx.graphics.derive_shader(base, camera) else {
            log::error!("Failed to derive the UI shader");
            ctx.graphics.remove_camera(camera);
            return None;
        };
        Some(Self { camera, shader })
    }

    /// Shader drawing through the UI camera
    pub fn shader(&self) -> ShaderId {
        self.shader
    }

    /// Style for groups drawn through this view
    pub fn style(&self) -> UIStyle {
        UIStyle::new(self.shader, FONT, 0.25, Vec4::new(1.0, 1.0, 1.0, 1.0))
    }

    /// Re-centre the camera on the window
    pub fn center(&self, ctx: &mut Context) {
        let dims = ctx.window_dims();
        if let Some(camera) = ctx.graphics.camera_mut(self.camera) {
            camera.position = Vec3::new(dims.x / 2.0, dims.y / 2.0, 0.0);
            log::debug!("UI camera at ({}, {})", camera.position.x, camera.position.y);
        }
    }

    /// Advance the camera
    pub fn update(&self, dt: f32, ctx: &mut Context) {
        let dims = ctx.window_dims();
        if let Some(camera) = ctx.graphics.camera_mut(self.camera) {
            camera.update(dt, dims);
        }
    }

    /// Remove the shader and the camera
    pub fn destroy(&self, ctx: &mut Context) {
        ctx.graphics.remove_shader(self.shader);
        ctx.graphics.remove_camera(self.camera);
    }
}

/// Menu button with a centred caption
pub fn button(position: Vec3, dimensions: Vec2, caption: &str, window_dims: Vec2) -> Button {
    Button::new(
        Label::new(position, dimensions, BUTTON_TEXTURE, window_dims)
            .with_label(caption, Alignment::Center)
            .with_text_alignment(Alignment::Center, Alignment::Center),
    )
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use acetylene::assets::{FontdueDecoder, ImageFileDecoder};
    use acetylene::config::{GraphicsConfig, WindowConfig};

    /// Headless 800x600 context without assets on disk
    pub(crate) fn context() -> Context {
        let window = HeadlessWindow::new(&WindowConfig::default());
        let dims = window.dimensions_f32();
        let audio = AudioManager::new(Box::new(SilentBackend::new()), 1.0).unwrap();
        let graphics = GraphicsManager::new(
            Box::new(RecordingBackend::new()),
            &GraphicsConfig::default(),
            dims,
            Box::new(ImageFileDecoder),
            Box::new(FontdueDecoder),
        )
        .unwrap();
        Context::new(Box::new(window), InputManager::new(), audio, graphics)
    }

    /// Press and release the left button over a window point, one frame each
    pub(crate) fn click(ctx: &mut Context, at: Vec2) {
        ctx.pump_input();
        ctx.input.move_mouse(at);
        ctx.input.press_mouse_button(MouseButton::Left);
    }

    /// Finish a click started with [`click`]
    pub(crate) fn release(ctx: &mut Context) {
        ctx.pump_input();
        ctx.input.release_mouse_button(MouseButton::Left);
    }

    #[test]
    fn test_ui_view_lifecycle() {
        let mut ctx = context();
        let view = UiView::new(&mut ctx).unwrap();
        assert!(ctx.graphics.shader(view.shader()).is_some());
        assert_eq!(ctx.mouse_position_in(view.shader()), ctx.input.mouse_position());

        view.destroy(&mut ctx);
        assert!(ctx.graphics.shader(view.shader()).is_none());
    }
}
