//! # Acetylene
//!
//! A small 2D framework: a sprite-batching renderer with bitmap-font text,
//! edge-detected input, fire-and-forget audio, a widget toolkit laid out in
//! window-normalized space, and scenes driven by a fixed-timestep loop.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use acetylene::prelude::*;
//!
//! struct Title;
//!
//! impl InputListener for Title {}
//!
//! impl Scene for Title {
//!     fn init(&mut self, _ctx: &mut Context) -> bool {
//!         true
//!     }
//!
//!     fn draw(&mut self, _ctx: &mut Context) {}
//!
//!     fn process_input(&mut self, ctx: &mut Context) -> bool {
//!         !ctx.input.is_key_pressed(KeyCode::Escape)
//!     }
//!
//!     fn update(&mut self, _dt: f32, _ctx: &mut Context) {}
//!
//!     fn destroy(&mut self, _ctx: &mut Context) {}
//! }
//!
//! fn main() -> Result<(), AppError> {
//!     let config = AppConfig::default();
//!     let backends = Backends::new(Box::new(RecordingBackend::new()), Box::new(SilentBackend::new()));
//!     let mut app = App::new(
//!         &config,
//!         |window| Ok(Box::new(HeadlessWindow::new(window).with_frame_budget(60)) as Box<dyn Window>),
//!         backends,
//!         vec![(SceneId(0), Box::new(Title) as Box<dyn Scene>)],
//!     )?;
//!     app.run();
//!     app.destroy();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod audio;
pub mod config;
pub mod context;
pub mod foundation;
pub mod input;
pub mod render;
pub mod scene;
pub mod ui;
pub mod window;

mod app;

pub use app::{App, AppError, AppResult, Backends};

/// Common imports for framework users
pub mod prelude {
    pub use crate::{
        App, AppError, Backends,
        audio::{AudioBackend, AudioManager, SilentBackend},
        config::{AppConfig, Config, options::Options},
        context::Context,
        foundation::math::{IVec2, Mat4, Vec2, Vec3, Vec4},
        input::{InputListener, InputManager, KeyCode, MouseButton},
        render::{
            Alignment, Animation, Camera, Entity, GraphicsBackend, GraphicsManager, RecordingBackend,
            ShaderId, Sprite, TextSubmission,
        },
        scene::{Scene, SceneId},
        ui::{widgets::*, ComponentId, EventId, GroupId, UIGroup, UIListener, UIStyle},
        window::{HeadlessWindow, Window},
    };
}
