//! Shared subsystems handed to every scene and UI call

use crate::audio::AudioManager;
use crate::foundation::math::Vec2;
use crate::input::{ControllerId, GamepadState, InputEvent, InputManager, InputSource};
use crate::render::{GraphicsManager, ShaderId};
use crate::scene::SceneId;
use crate::window::Window;

/// The window, input, audio and graphics managers of a running app.
///
/// Scenes and UI components reach every subsystem through this struct
/// instead of global state. Scene switches are only requested here; the
/// app applies them between frames.
pub struct Context {
    /// Platform window
    pub window: Box<dyn Window>,
    /// Edge-detected input state
    pub input: InputManager,
    /// Effects and music
    pub audio: AudioManager,
    /// Batching renderer
    pub graphics: GraphicsManager,
    events: Vec<InputEvent>,
    scene_request: Option<SceneId>,
}

/// Adapter letting the input manager poll a boxed window
struct WindowSource<'a>(&'a mut dyn Window);

impl InputSource for WindowSource<'_> {
    fn poll_events(&mut self, input: &mut InputManager) {
        self.0.poll_events(input);
    }

    fn gamepad_state(&mut self, controller: ControllerId) -> Option<GamepadState> {
        self.0.gamepad_state(controller)
    }
}

impl Context {
    /// Bundle initialized subsystems
    pub fn new(window: Box<dyn Window>, input: InputManager, audio: AudioManager, graphics: GraphicsManager) -> Self {
        Self {
            window,
            input,
            audio,
            graphics,
            events: Vec::new(),
            scene_request: None,
        }
    }

    /// Window client area in pixels
    pub fn window_dims(&self) -> Vec2 {
        self.window.dimensions_f32()
    }

    /// Mouse position seen through the camera of `shader`. Falls back to
    /// window space when the shader or its camera is gone.
    pub fn mouse_position_in(&self, shader: ShaderId) -> Vec2 {
        match self.graphics.shader_camera(shader) {
            Some(camera) => self.input.mouse_position_in(camera, self.window_dims()),
            None => self.input.mouse_position(),
        }
    }

    /// Advance input by one frame and collect the events it raised
    pub fn pump_input(&mut self) {
        self.input.update(&mut WindowSource(self.window.as_mut()));
        self.events = self.input.take_events();
    }

    /// Events raised by the last [`pump_input`](Self::pump_input)
    pub fn frame_events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Ask the app to switch to `scene` after this frame's input
    pub fn request_scene(&mut self, scene: SceneId) {
        log::debug!("Scene {} requested", scene.0);
        self.scene_request = Some(scene);
    }

    /// Pending scene switch, cleared on read
    pub fn take_scene_request(&mut self) -> Option<SceneId> {
        self.scene_request.take()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::config::WindowConfig;
    use crate::foundation::math::Vec3;
    use crate::input::{KeyCode, MouseButton};
    use crate::render::graphics::tests::graphics;
    use crate::render::Camera;
    use crate::window::HeadlessWindow;

    /// 800x600 headless context with the stub renderer and silent audio
    pub(crate) fn context() -> Context {
        context_with(HeadlessWindow::new(&WindowConfig::default()))
    }

    /// Same as [`context`] around a prepared window
    pub(crate) fn context_with(window: HeadlessWindow) -> Context {
        let (graphics, _recording) = graphics();
        let audio = AudioManager::new(Box::new(SilentBackend::new()), 1.0).unwrap();
        Context::new(Box::new(window), InputManager::new(), audio, graphics)
    }

    /// Shader whose camera maps world units one-to-one onto window pixels
    pub(crate) fn pixel_shader(ctx: &mut Context) -> ShaderId {
        let dims = ctx.window_dims();
        let camera = ctx
            .graphics
            .add_camera(Camera::with_position(Vec3::new(dims.x / 2.0, dims.y / 2.0, 0.0), dims));
        let base = ctx.graphics.default_shader();
        ctx.graphics.derive_shader(base, camera).unwrap()
    }

    #[test]
    fn test_scene_request_is_taken_once() {
        let mut ctx = context();
        assert_eq!(ctx.take_scene_request(), None);
        ctx.request_scene(SceneId(3));
        assert_eq!(ctx.take_scene_request(), Some(SceneId(3)));
        assert_eq!(ctx.take_scene_request(), None);
    }

    #[test]
    fn test_pump_input_collects_events() {
        let mut ctx = context();
        ctx.input.press_key(KeyCode::A);
        ctx.input.type_char('a');
        ctx.pump_input();
        assert_eq!(
            ctx.frame_events(),
            &[InputEvent::KeyPressed(KeyCode::A), InputEvent::CharTyped('a')]
        );
        ctx.pump_input();
        assert!(ctx.frame_events().is_empty());
        assert!(ctx.input.is_key_down(KeyCode::A));
        assert!(!ctx.input.is_key_pressed(KeyCode::A));
    }

    #[test]
    fn test_mouse_position_through_shader_camera() {
        let mut ctx = context();
        let shader = pixel_shader(&mut ctx);
        ctx.input.move_mouse(Vec2::new(120.0, 80.0));
        assert_eq!(ctx.mouse_position_in(shader), Vec2::new(120.0, 80.0));

        let default = ctx.graphics.default_shader();
        assert_eq!(ctx.mouse_position_in(default), Vec2::new(-280.0, -220.0));
        ctx.input.press_mouse_button(MouseButton::Left);
        assert!(ctx.input.is_mouse_button_pressed(MouseButton::Left));
    }
}
