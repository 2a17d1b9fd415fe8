//! Window management
//!
//! [`Window`] is what the app loop needs from a platform window: its size,
//! title and fullscreen state, a once-per-frame `update` that presents the
//! frame and reports close requests, and the [`InputSource`] role that pumps
//! platform events into the input manager.

#[cfg(feature = "glfw-window")]
pub mod glfw;

#[cfg(feature = "glfw-window")]
pub use self::glfw::GlfwWindow;

use crate::config::WindowConfig;
use crate::foundation::math::{to_vec2, IVec2, Vec2};
use crate::input::{ControllerId, GamepadState, InputManager, InputSource, KeyCode, MouseButton};
use std::collections::{HashMap, VecDeque};
use thiserror::Error;

/// Window management errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The platform library failed to start
    #[error("Window system initialization failed: {0}")]
    InitializationFailed(String),

    /// The OS refused to open the window
    #[error("Window creation failed")]
    CreationFailed,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Platform window
pub trait Window: InputSource {
    /// Client area in pixels
    fn dimensions(&self) -> IVec2;

    /// Resize the windowed client area. While fullscreen the size is stored
    /// and applied when leaving fullscreen.
    fn set_dimensions(&mut self, dimensions: IVec2);

    /// Title bar text
    fn title(&self) -> &str;

    /// Set the title bar text
    fn set_title(&mut self, title: &str);

    /// Window covers the primary monitor
    fn is_fullscreen(&self) -> bool;

    /// Switch between fullscreen and windowed mode
    fn set_fullscreen(&mut self, fullscreen: bool);

    /// Present the frame. `false` once the user asked to close the window.
    fn update(&mut self) -> bool;

    /// Current clipboard text, if any
    fn clipboard(&self) -> Option<String>;

    /// Client area as floats
    fn dimensions_f32(&self) -> Vec2 {
        to_vec2(self.dimensions())
    }
}

/// One platform event fed to the input manager by [`HeadlessWindow`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlatformEvent {
    /// Key down
    KeyPress(KeyCode),
    /// Key up
    KeyRelease(KeyCode),
    /// Text input
    Char(char),
    /// Cursor moved to a window position (origin bottom-left)
    MouseMove(Vec2),
    /// Mouse button down
    MousePress(MouseButton),
    /// Mouse button up
    MouseRelease(MouseButton),
    /// Scroll wheel
    Scroll(Vec2),
    /// Gamepad attached with an initial state
    ControllerConnected(ControllerId, GamepadState),
    /// Gamepad detached, reported through the hotplug queue
    ControllerDisconnected(ControllerId),
}

/// Window without a display.
///
/// Each `poll_events` call consumes one scripted frame of platform events.
/// `update` reports a close request once the frame budget is spent or
/// [`request_close`](Self::request_close) was called.
#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    dimensions: IVec2,
    windowed_dimensions: IVec2,
    screen: IVec2,
    title: String,
    fullscreen: bool,
    frames: VecDeque<Vec<PlatformEvent>>,
    frame_budget: Option<u64>,
    frames_presented: u64,
    close_requested: bool,
    gamepads: HashMap<ControllerId, GamepadState>,
    clipboard: Option<String>,
}

impl HeadlessWindow {
    /// Create a window from its configuration
    pub fn new(config: &WindowConfig) -> Self {
        let mut window = Self {
            dimensions: config.dimensions,
            windowed_dimensions: config.dimensions,
            screen: IVec2::new(1920, 1080),
            title: config.title.clone(),
            fullscreen: false,
            frames: VecDeque::new(),
            frame_budget: None,
            frames_presented: 0,
            close_requested: false,
            gamepads: HashMap::new(),
            clipboard: None,
        };
        window.set_fullscreen(config.fullscreen);
        log::info!(
            "Created headless window \"{}\" ({}x{})",
            window.title,
            window.dimensions.x,
            window.dimensions.y
        );
        window
    }

    /// Close after `frames` calls to `update`
    pub fn with_frame_budget(mut self, frames: u64) -> Self {
        self.frame_budget = Some(frames);
        self
    }

    /// Queue one frame of platform events
    pub fn push_frame(&mut self, events: Vec<PlatformEvent>) {
        self.frames.push_back(events);
    }

    /// Size the window takes in fullscreen mode
    pub fn screen_dimensions(&self) -> IVec2 {
        self.screen
    }

    /// Frames still queued
    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// Make the next `update` report a close request
    pub fn request_close(&mut self) {
        self.close_requested = true;
    }

    /// Set what a connected gamepad reports when sampled
    pub fn set_gamepad(&mut self, controller: ControllerId, state: GamepadState) {
        self.gamepads.insert(controller, state);
    }

    /// Set the clipboard text
    pub fn set_clipboard(&mut self, text: impl Into<String>) {
        self.clipboard = Some(text.into());
    }
}

impl InputSource for HeadlessWindow {
    fn poll_events(&mut self, input: &mut InputManager) {
        let Some(events) = self.frames.pop_front() else {
            return;
        };
        for event in events {
            match event {
                PlatformEvent::KeyPress(key) => input.press_key(key),
                PlatformEvent::KeyRelease(key) => input.release_key(key),
                PlatformEvent::Char(c) => input.type_char(c),
                PlatformEvent::MouseMove(position) => input.move_mouse(position),
                PlatformEvent::MousePress(button) => input.press_mouse_button(button),
                PlatformEvent::MouseRelease(button) => input.release_mouse_button(button),
                PlatformEvent::Scroll(offset) => input.scroll_mouse(offset),
                PlatformEvent::ControllerConnected(id, state) => {
                    self.gamepads.insert(id, state);
                    input.connect_controller(id, state);
                }
                PlatformEvent::ControllerDisconnected(id) => {
                    self.gamepads.remove(&id);
                    input.hotplug().disconnect(id);
                }
            }
        }
    }

    fn gamepad_state(&mut self, controller: ControllerId) -> Option<GamepadState> {
        self.gamepads.get(&controller).copied()
    }
}

impl Window for HeadlessWindow {
    fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    fn set_dimensions(&mut self, dimensions: IVec2) {
        self.windowed_dimensions = dimensions;
        log::info!("Updated window dimensions ({}, {})", dimensions.x, dimensions.y);
        if !self.fullscreen {
            self.dimensions = dimensions;
        }
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen && !self.fullscreen {
            log::info!("Setting window to fullscreen mode");
            self.windowed_dimensions = self.dimensions;
            self.dimensions = self.screen;
        } else if !fullscreen && self.fullscreen {
            log::info!("Setting window to windowed mode");
            self.dimensions = self.windowed_dimensions;
        }
        self.fullscreen = fullscreen;
    }

    fn update(&mut self) -> bool {
        if self.close_requested {
            return false;
        }
        if let Some(budget) = self.frame_budget {
            if self.frames_presented >= budget {
                log::debug!("Headless window frame budget of {} spent", budget);
                return false;
            }
        }
        self.frames_presented += 1;
        true
    }

    fn clipboard(&self) -> Option<String> {
        self.clipboard.clone()
    }
}
