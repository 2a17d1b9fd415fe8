//! App lifecycle and the main loop

use crate::assets::{FontDecoder, FontdueDecoder, ImageFileDecoder, TextureDecoder};
use crate::audio::{AudioBackend, AudioManager};
use crate::config::{AppConfig, WindowConfig};
use crate::context::Context;
use crate::foundation::logging;
use crate::foundation::time::{FixedTimestep, StepPlan, Timer};
use crate::input::InputManager;
use crate::render::{GraphicsBackend, GraphicsManager};
use crate::scene::{Scene, SceneId, SceneSlot};
use crate::window::{Window, WindowResult};
use std::collections::BTreeMap;
use std::fmt::Display;
use thiserror::Error;

/// App-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A subsystem or the initial scene could not be brought up
    #[error("App initialization failed: {0}")]
    InitializationFailed(String),
}

/// Result type for app operations
pub type AppResult<T> = Result<T, AppError>;

/// Device and file-format plumbing the app is built on
pub struct Backends {
    /// GPU access for the renderer
    pub graphics: Box<dyn GraphicsBackend>,
    /// Output device for the audio manager
    pub audio: Box<dyn AudioBackend>,
    /// Image file decoding
    pub texture_decoder: Box<dyn TextureDecoder>,
    /// Font rasterization
    pub font_decoder: Box<dyn FontDecoder>,
}

impl Backends {
    /// Backends reading images with `image` and fonts with `fontdue`
    pub fn new(graphics: Box<dyn GraphicsBackend>, audio: Box<dyn AudioBackend>) -> Self {
        Self {
            graphics,
            audio,
            texture_decoder: Box::new(ImageFileDecoder),
            font_decoder: Box::new(FontdueDecoder),
        }
    }

    /// Replace the asset decoders
    pub fn with_decoders(mut self, texture_decoder: Box<dyn TextureDecoder>, font_decoder: Box<dyn FontDecoder>) -> Self {
        self.texture_decoder = texture_decoder;
        self.font_decoder = font_decoder;
        self
    }
}

/// Owns the subsystems and the registered scenes and drives the active one.
///
/// Each frame draws the active scene, pumps input into it, applies a scene
/// switch the scene requested, then runs fixed update steps for the wall time
/// that passed (see [`FixedTimestep`]).
pub struct App {
    context: Context,
    scenes: BTreeMap<SceneId, SceneSlot>,
    current: Option<SceneId>,
    timestep: FixedTimestep,
    destroyed: bool,
}

fn init_failure(subsystem: &str, error: impl Display) -> AppError {
    log::error!("Failed to initialize {}: {}", subsystem, error);
    AppError::InitializationFailed(format!("{subsystem}: {error}"))
}

impl App {
    /// Bring up logging, the window, input, audio and the renderer in that
    /// order, then activate the first of `scenes`.
    pub fn new<F>(
        config: &AppConfig,
        open_window: F,
        backends: Backends,
        scenes: Vec<(SceneId, Box<dyn Scene>)>,
    ) -> AppResult<Self>
    where
        F: FnOnce(&WindowConfig) -> WindowResult<Box<dyn Window>>,
    {
        if logging::init(&config.log) {
            log::info!("Initialized logging system");
        }
        log::info!("Initializing app");

        let Some(initial) = scenes.first().map(|(id, _)| *id) else {
            return Err(init_failure("scenes", "no scene registered"));
        };

        let window = open_window(&config.window).map_err(|e| init_failure("app window", e))?;
        log::info!("Initialized app window");
        let input = InputManager::new();
        log::info!("Initialized user input manager");
        let audio = AudioManager::new(backends.audio, config.audio.volume).map_err(|e| init_failure("audio manager", e))?;
        log::info!("Initialized audio manager");
        let graphics = GraphicsManager::new(
            backends.graphics,
            &config.graphics,
            window.dimensions_f32(),
            backends.texture_decoder,
            backends.font_decoder,
        )
        .map_err(|e| init_failure("renderer", e))?;
        log::info!("Initialized the renderer");

        let timestep = FixedTimestep::new(
            config.physics.target_updates_per_second,
            config.physics.max_updates_per_frame,
        );

        let mut slots = BTreeMap::new();
        for (id, scene) in scenes {
            if slots.insert(id, SceneSlot::new(scene)).is_some() {
                log::warn!("Scene {} registered twice, keeping the last one", id.0);
            }
        }

        let mut app = Self {
            context: Context::new(window, input, audio, graphics),
            scenes: slots,
            current: None,
            timestep,
            destroyed: false,
        };
        if !app.set_scene(initial) {
            return Err(init_failure("initial scene", format!("scene {} refused to initialize", initial.0)));
        }
        log::info!("Set initial scene, done initializing app");
        Ok(app)
    }

    /// Subsystems shared with the scenes
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable subsystems
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// The active scene
    pub fn current_scene(&self) -> Option<SceneId> {
        self.current
    }

    /// Registered scene ids
    pub fn scene_ids(&self) -> impl Iterator<Item = SceneId> + '_ {
        self.scenes.keys().copied()
    }

    /// Run frames until the window closes, a scene's `process_input` returns
    /// `false` or no scene is active
    pub fn run(&mut self) {
        log::info!("Running main app loop");
        let mut timer = Timer::new();
        while self.context.window.update() {
            if !self.frame(timer.tick()) {
                break;
            }
        }
        log::info!(
            "Main app loop finished after {} frames ({:.1} fps average)",
            timer.frame_count(),
            timer.average_fps()
        );
    }

    /// One loop iteration for a frame that took `elapsed_seconds`.
    /// `false` when the loop should stop.
    pub fn frame(&mut self, elapsed_seconds: f64) -> bool {
        let Some(slot) = self.current.and_then(|id| self.scenes.get_mut(&id)) else {
            log::warn!("No active scene, stopping");
            return false;
        };
        let ctx = &mut self.context;

        ctx.graphics.begin();
        slot.scene_mut().draw(ctx);
        let stats = ctx.graphics.end();
        log::trace!("Drew {} sprites in {} draw calls", stats.sprites, stats.draw_calls);

        ctx.pump_input();
        for event in ctx.frame_events().to_vec() {
            slot.scene_mut().on_input_event(&event);
        }
        if !slot.scene_mut().process_input(ctx) {
            return false;
        }
        if let Some(next) = ctx.take_scene_request() {
            self.set_scene(next);
        }

        let plan = self.timestep.plan(elapsed_seconds);
        self.step(plan);
        true
    }

    fn step(&mut self, plan: StepPlan) {
        let Some(slot) = self.current.and_then(|id| self.scenes.get_mut(&id)) else {
            return;
        };
        let ctx = &mut self.context;
        let window_dims = ctx.window_dims();
        for _ in 0..plan.steps {
            slot.scene_mut().update(1.0, ctx);
            ctx.graphics.update(1.0, window_dims);
        }
        slot.scene_mut().update(plan.remainder, ctx);
        ctx.graphics.update(plan.remainder, window_dims);
        ctx.audio.update();
    }

    /// Make `next` the active scene.
    ///
    /// The active scene is left first. Setting the active scene again only
    /// leaves it, so no scene is active afterwards. `next` is initialized if
    /// needed and entered with the previous scene's id. `false` if `next` is
    /// unknown or fails to initialize.
    pub fn set_scene(&mut self, next: SceneId) -> bool {
        log::info!("Setting scene {}", next.0);
        if !self.scenes.contains_key(&next) {
            log::warn!("Scene {} is not registered", next.0);
            return false;
        }

        if let Some(current) = self.current {
            if let Some(slot) = self.scenes.get_mut(&current) {
                slot.scene_mut().leave(&mut self.context, next);
            }
            if current == next {
                self.current = None;
                return true;
            }
        }

        let Some(slot) = self.scenes.get_mut(&next) else {
            return false;
        };
        if !slot.init_scene(&mut self.context) {
            log::warn!("Scene {} failed to initialize", next.0);
            return false;
        }
        slot.scene_mut().enter(&mut self.context, self.current.unwrap_or(next));
        self.current = Some(next);
        true
    }

    /// Destroy and unregister a scene that is not active
    pub fn destroy_scene(&mut self, id: SceneId) -> bool {
        log::info!("Destroying scene {}", id.0);
        if self.current == Some(id) {
            log::warn!("Cannot destroy the current scene");
            return false;
        }
        let Some(mut slot) = self.scenes.remove(&id) else {
            log::warn!("Scene {} is not registered", id.0);
            return false;
        };
        slot.destroy_scene(&mut self.context);
        true
    }

    /// Leave the active scene, destroy every scene and shut the subsystems
    /// down in reverse order
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        log::info!("Destroying app");
        if let Some(current) = self.current {
            self.set_scene(current);
        }
        for (_, mut slot) in std::mem::take(&mut self.scenes) {
            slot.destroy_scene(&mut self.context);
        }
        log::info!("Destroyed all scenes");
        self.context.graphics.destroy();
        self.context.audio.destroy();
        self.context.input.destroy();
        log::info!("Destroyed user input manager");
        self.destroyed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::input::KeyCode;
    use crate::render::graphics::tests::{MonoFontStub, PngStub};
    use crate::render::RecordingBackend;
    use crate::scene::tests::{Calls, LoggedScene};
    use crate::window::{HeadlessWindow, PlatformEvent, WindowError};

    const A: SceneId = SceneId(1);
    const B: SceneId = SceneId(2);

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.log.enabled = false;
        config
    }

    fn backends() -> Backends {
        Backends::new(Box::new(RecordingBackend::new()), Box::new(SilentBackend::new()))
            .with_decoders(Box::new(PngStub), Box::new(MonoFontStub))
    }

    fn app_with(window: HeadlessWindow, logged: Vec<(SceneId, LoggedScene)>) -> AppResult<App> {
        let scenes = logged
            .into_iter()
            .map(|(id, scene)| (id, Box::new(scene) as Box<dyn Scene>))
            .collect();
        App::new(&config(), move |_| Ok(Box::new(window) as Box<dyn Window>), backends(), scenes)
    }

    fn app(calls: &Calls) -> App {
        let window = HeadlessWindow::new(&WindowConfig::default());
        app_with(
            window,
            vec![
                (A, LoggedScene::new("a", calls)),
                (B, LoggedScene::new("b", calls)),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_new_enters_first_scene() {
        let calls = Calls::default();
        let app = app(&calls);
        assert_eq!(app.current_scene(), Some(A));
        assert_eq!(*calls.borrow(), vec!["a.init", "a.enter 1"]);
        assert_eq!(app.scene_ids().collect::<Vec<_>>(), vec![A, B]);
    }

    #[test]
    fn test_new_without_scenes_fails() {
        let result = app_with(HeadlessWindow::new(&WindowConfig::default()), Vec::new());
        assert!(matches!(result, Err(AppError::InitializationFailed(_))));
    }

    #[test]
    fn test_new_fails_when_window_cannot_open() {
        let calls = Calls::default();
        let result = App::new(
            &config(),
            |_| Err(WindowError::CreationFailed),
            backends(),
            vec![(A, Box::new(LoggedScene::new("a", &calls)) as Box<dyn Scene>)],
        );
        assert!(matches!(result, Err(AppError::InitializationFailed(_))));
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn test_new_fails_when_initial_scene_fails() {
        let calls = Calls::default();
        let mut scene = LoggedScene::new("a", &calls);
        scene.init_result = false;
        let result = app_with(HeadlessWindow::new(&WindowConfig::default()), vec![(A, scene)]);
        assert!(result.is_err());
    }

    #[test]
    fn test_set_scene_leaves_and_enters() {
        let calls = Calls::default();
        let mut app = app(&calls);
        calls.borrow_mut().clear();

        assert!(app.set_scene(B));
        assert!(app.set_scene(A));
        assert_eq!(
            *calls.borrow(),
            vec!["a.leave 2", "b.init", "b.enter 1", "b.leave 1", "a.enter 2"]
        );
        assert!(!app.set_scene(SceneId(9)));
        assert_eq!(app.current_scene(), Some(A));
    }

    #[test]
    fn test_setting_current_scene_deactivates_it() {
        let calls = Calls::default();
        let mut app = app(&calls);
        assert!(app.set_scene(A));
        assert_eq!(app.current_scene(), None);
        assert!(!app.frame(0.0));
    }

    #[test]
    fn test_destroy_scene_refuses_current_and_unknown() {
        let calls = Calls::default();
        let mut app = app(&calls);
        assert!(!app.destroy_scene(A));
        assert!(!app.destroy_scene(SceneId(9)));

        app.set_scene(B);
        app.set_scene(A);
        calls.borrow_mut().clear();
        assert!(app.destroy_scene(B));
        assert_eq!(*calls.borrow(), vec!["b.destroy"]);
        assert!(!app.set_scene(B));
    }

    #[test]
    fn test_frame_runs_capped_fixed_steps() {
        let calls = Calls::default();
        let mut app = app(&calls);
        calls.borrow_mut().clear();

        assert!(app.frame(0.5));
        let calls = calls.borrow();
        assert_eq!(calls[..2], ["a.draw", "a.input"]);
        assert_eq!(calls.iter().filter(|c| *c == "a.update 1.00").count(), 10);
        assert_eq!(calls.last().map(String::as_str), Some("a.update 0.00"));
        assert_eq!(calls.len(), 13);
    }

    #[test]
    fn test_frame_dispatches_input_events_before_process_input() {
        let calls = Calls::default();
        let mut window = HeadlessWindow::new(&WindowConfig::default());
        window.push_frame(vec![PlatformEvent::KeyPress(KeyCode::A)]);
        let mut app = app_with(window, vec![(A, LoggedScene::new("a", &calls))]).unwrap();
        calls.borrow_mut().clear();

        app.frame(0.0);
        assert_eq!(calls.borrow()[..3], ["a.draw", "a.key A", "a.input"]);
        assert!(app.context().input.is_key_pressed(KeyCode::A));
    }

    #[test]
    fn test_requested_scene_is_applied_after_input() {
        let calls = Calls::default();
        let mut scene = LoggedScene::new("a", &calls);
        scene.request_on_input = Some(B);
        let window = HeadlessWindow::new(&WindowConfig::default());
        let mut app = app_with(
            window,
            vec![(A, scene), (B, LoggedScene::new("b", &calls))],
        )
        .unwrap();
        calls.borrow_mut().clear();

        assert!(app.frame(0.0));
        assert_eq!(app.current_scene(), Some(B));
        assert_eq!(
            *calls.borrow(),
            vec!["a.draw", "a.input", "a.leave 2", "b.init", "b.enter 1", "b.update 0.00"]
        );
    }

    #[test]
    fn test_process_input_false_stops_before_update() {
        let calls = Calls::default();
        let mut scene = LoggedScene::new("a", &calls);
        scene.keep_running = false;
        let mut app = app_with(HeadlessWindow::new(&WindowConfig::default()), vec![(A, scene)]).unwrap();
        calls.borrow_mut().clear();

        assert!(!app.frame(1.0));
        assert_eq!(*calls.borrow(), vec!["a.draw", "a.input"]);
    }

    #[test]
    fn test_run_until_window_closes() {
        let calls = Calls::default();
        let window = HeadlessWindow::new(&WindowConfig::default()).with_frame_budget(3);
        let mut app = app_with(window, vec![(A, LoggedScene::new("a", &calls))]).unwrap();
        app.run();
        assert_eq!(calls.borrow().iter().filter(|c| *c == "a.draw").count(), 3);
    }

    #[test]
    fn test_destroy_leaves_and_destroys_initialized_scenes() {
        let calls = Calls::default();
        let mut app = app(&calls);
        calls.borrow_mut().clear();

        app.destroy();
        app.destroy();
        assert_eq!(*calls.borrow(), vec!["a.leave 1", "a.destroy"]);
        assert_eq!(app.current_scene(), None);
        assert_eq!(app.scene_ids().count(), 0);
    }
}
