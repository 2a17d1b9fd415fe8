//! GLFW desktop window
//!
//! Opens an OpenGL 3.3 core context, translates GLFW events into input
//! manager calls and polls joystick presence every frame. Joysticks that
//! vanish are reported through the controller hotplug queue.

use super::{Window, WindowError, WindowResult};
use crate::foundation::math::{IVec2, Vec2};
use crate::input::{
    ControllerAxis, ControllerButton, ControllerId, GamepadState, InputManager, InputSource, KeyCode, MouseButton,
};
use glfw::{Action, Context, GamepadAxis, GamepadButton, JoystickId, WindowEvent, WindowMode};
use std::collections::BTreeSet;

const JOYSTICKS: [JoystickId; 16] = [
    JoystickId::Joystick1,
    JoystickId::Joystick2,
    JoystickId::Joystick3,
    JoystickId::Joystick4,
    JoystickId::Joystick5,
    JoystickId::Joystick6,
    JoystickId::Joystick7,
    JoystickId::Joystick8,
    JoystickId::Joystick9,
    JoystickId::Joystick10,
    JoystickId::Joystick11,
    JoystickId::Joystick12,
    JoystickId::Joystick13,
    JoystickId::Joystick14,
    JoystickId::Joystick15,
    JoystickId::Joystick16,
];

const GAMEPAD_BUTTONS: [(ControllerButton, GamepadButton); 15] = [
    (ControllerButton::A, GamepadButton::ButtonA),
    (ControllerButton::B, GamepadButton::ButtonB),
    (ControllerButton::X, GamepadButton::ButtonX),
    (ControllerButton::Y, GamepadButton::ButtonY),
    (ControllerButton::LeftBumper, GamepadButton::ButtonLeftBumper),
    (ControllerButton::RightBumper, GamepadButton::ButtonRightBumper),
    (ControllerButton::Back, GamepadButton::ButtonBack),
    (ControllerButton::Start, GamepadButton::ButtonStart),
    (ControllerButton::Guide, GamepadButton::ButtonGuide),
    (ControllerButton::LeftThumb, GamepadButton::ButtonLeftThumb),
    (ControllerButton::RightThumb, GamepadButton::ButtonRightThumb),
    (ControllerButton::DpadUp, GamepadButton::ButtonDpadUp),
    (ControllerButton::DpadRight, GamepadButton::ButtonDpadRight),
    (ControllerButton::DpadDown, GamepadButton::ButtonDpadDown),
    (ControllerButton::DpadLeft, GamepadButton::ButtonDpadLeft),
];

const GAMEPAD_AXES: [(ControllerAxis, GamepadAxis); 6] = [
    (ControllerAxis::LeftX, GamepadAxis::AxisLeftX),
    (ControllerAxis::LeftY, GamepadAxis::AxisLeftY),
    (ControllerAxis::RightX, GamepadAxis::AxisRightX),
    (ControllerAxis::RightY, GamepadAxis::AxisRightY),
    (ControllerAxis::LeftTrigger, GamepadAxis::AxisLeftTrigger),
    (ControllerAxis::RightTrigger, GamepadAxis::AxisRightTrigger),
];

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
    dimensions: IVec2,
    windowed_dimensions: IVec2,
    title: String,
    fullscreen: bool,
    present: BTreeSet<u8>,
}

impl GlfwWindow {
    /// Open a window; `fullscreen` covers the primary monitor
    pub fn new(dimensions: IVec2, title: &str, fullscreen: bool) -> WindowResult<Self> {
        let mut glfw =
            glfw::init(glfw::fail_on_errors).map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;
        log::info!("Initialized GLFW library");

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        glfw.window_hint(glfw::WindowHint::Resizable(false));

        let width = u32::try_from(dimensions.x).map_err(|_| WindowError::CreationFailed)?;
        let height = u32::try_from(dimensions.y).map_err(|_| WindowError::CreationFailed)?;
        let (mut window, events) = glfw
            .create_window(width, height, title, WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;
        log::info!("Created GLFW window");

        window.set_key_polling(true);
        window.set_char_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_close_polling(true);
        window.make_current();

        let mut result = Self {
            glfw,
            window,
            events,
            dimensions,
            windowed_dimensions: dimensions,
            title: title.to_string(),
            fullscreen: false,
            present: BTreeSet::new(),
        };
        result.set_fullscreen(fullscreen);
        result.center();
        Ok(result)
    }

    fn monitor_size(&mut self) -> Option<IVec2> {
        self.glfw.with_primary_monitor(|_, monitor| {
            let mode = monitor?.get_video_mode()?;
            Some(IVec2::new(mode.width as i32, mode.height as i32))
        })
    }

    fn center(&mut self) {
        if let Some(screen) = self.monitor_size() {
            self.window.set_pos(
                (screen.x - self.dimensions.x) / 2,
                (screen.y - self.dimensions.y) / 2,
            );
        }
    }

    fn poll_joysticks(&mut self, input: &mut InputManager) {
        for (slot, id) in JOYSTICKS.iter().enumerate() {
            let controller = ControllerId(slot as u8);
            let joystick = self.glfw.get_joystick(*id);
            let present = joystick.is_present() && joystick.is_gamepad();
            if present && self.present.insert(controller.0) {
                let state = read_gamepad(&joystick).unwrap_or_default();
                input.connect_controller(controller, state);
            } else if !present && self.present.remove(&controller.0) {
                input.hotplug().disconnect(controller);
            }
        }
    }
}

impl InputSource for GlfwWindow {
    fn poll_events(&mut self, input: &mut InputManager) {
        self.glfw.poll_events();
        let height = self.dimensions.y as f32;
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(key, _, Action::Press, _) => input.press_key(map_key(key)),
                WindowEvent::Key(key, _, Action::Release, _) => input.release_key(map_key(key)),
                WindowEvent::Char(c) => input.type_char(c),
                WindowEvent::CursorPos(x, y) => input.move_mouse(Vec2::new(x as f32, height - y as f32)),
                WindowEvent::MouseButton(button, Action::Press, _) => input.press_mouse_button(map_mouse_button(button)),
                WindowEvent::MouseButton(button, Action::Release, _) => {
                    input.release_mouse_button(map_mouse_button(button));
                }
                WindowEvent::Scroll(x, y) => input.scroll_mouse(Vec2::new(x as f32, y as f32)),
                _ => {}
            }
        }
        self.poll_joysticks(input);
    }

    fn gamepad_state(&mut self, controller: ControllerId) -> Option<GamepadState> {
        let id = JOYSTICKS.get(controller.0 as usize)?;
        read_gamepad(&self.glfw.get_joystick(*id))
    }
}

impl Window for GlfwWindow {
    fn dimensions(&self) -> IVec2 {
        self.dimensions
    }

    fn set_dimensions(&mut self, dimensions: IVec2) {
        self.windowed_dimensions = dimensions;
        log::info!("Updated window dimensions ({}, {})", dimensions.x, dimensions.y);
        if self.fullscreen {
            return;
        }
        self.dimensions = dimensions;
        self.window.set_size(dimensions.x, dimensions.y);
        self.center();
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
        self.window.set_title(title);
        log::info!("Set window title \"{}\"", title);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen && !self.fullscreen {
            log::info!("Setting window to fullscreen mode");
            let window = &mut self.window;
            let screen = self.glfw.with_primary_monitor(|_, monitor| {
                let monitor = monitor?;
                let mode = monitor.get_video_mode()?;
                window.set_monitor(WindowMode::FullScreen(monitor), 0, 0, mode.width, mode.height, None);
                Some(IVec2::new(mode.width as i32, mode.height as i32))
            });
            let Some(screen) = screen else {
                log::warn!("No primary monitor, staying windowed");
                return;
            };
            self.windowed_dimensions = self.dimensions;
            self.dimensions = screen;
        } else if !fullscreen && self.fullscreen {
            log::info!("Setting window to windowed mode");
            let dims = self.windowed_dimensions;
            self.window
                .set_monitor(WindowMode::Windowed, 0, 0, dims.x as u32, dims.y as u32, None);
            self.window.set_decorated(true);
            self.dimensions = dims;
            self.center();
        }
        self.fullscreen = fullscreen;
    }

    fn update(&mut self) -> bool {
        self.window.swap_buffers();
        !self.window.should_close()
    }

    fn clipboard(&self) -> Option<String> {
        self.window.get_clipboard_string()
    }
}

impl Drop for GlfwWindow {
    fn drop(&mut self) {
        log::info!("Destroyed window");
    }
}

fn read_gamepad(joystick: &glfw::Joystick) -> Option<GamepadState> {
    let state = joystick.get_gamepad_state()?;
    let mut pad = GamepadState::default();
    for (button, glfw_button) in GAMEPAD_BUTTONS {
        pad.buttons[button.index()] = state.get_button_state(glfw_button) == Action::Press;
    }
    for (axis, glfw_axis) in GAMEPAD_AXES {
        pad.axes[axis.index()] = state.get_axis(glfw_axis);
    }
    Some(pad)
}

fn map_mouse_button(button: glfw::MouseButton) -> MouseButton {
    match button {
        glfw::MouseButton::Button1 => MouseButton::Left,
        glfw::MouseButton::Button2 => MouseButton::Right,
        glfw::MouseButton::Button3 => MouseButton::Middle,
        other => MouseButton::Extra(other as u8 + 1),
    }
}

fn map_key(key: glfw::Key) -> KeyCode {
    use glfw::Key;
    match key {
        Key::A => KeyCode::A,
        Key::B => KeyCode::B,
        Key::C => KeyCode::C,
        Key::D => KeyCode::D,
        Key::E => KeyCode::E,
        Key::F => KeyCode::F,
        Key::G => KeyCode::G,
        Key::H => KeyCode::H,
        Key::I => KeyCode::I,
        Key::J => KeyCode::J,
        Key::K => KeyCode::K,
        Key::L => KeyCode::L,
        Key::M => KeyCode::M,
        Key::N => KeyCode::N,
        Key::O => KeyCode::O,
        Key::P => KeyCode::P,
        Key::Q => KeyCode::Q,
        Key::R => KeyCode::R,
        Key::S => KeyCode::S,
        Key::T => KeyCode::T,
        Key::U => KeyCode::U,
        Key::V => KeyCode::V,
        Key::W => KeyCode::W,
        Key::X => KeyCode::X,
        Key::Y => KeyCode::Y,
        Key::Z => KeyCode::Z,
        Key::Num0 => KeyCode::Digit(0),
        Key::Num1 => KeyCode::Digit(1),
        Key::Num2 => KeyCode::Digit(2),
        Key::Num3 => KeyCode::Digit(3),
        Key::Num4 => KeyCode::Digit(4),
        Key::Num5 => KeyCode::Digit(5),
        Key::Num6 => KeyCode::Digit(6),
        Key::Num7 => KeyCode::Digit(7),
        Key::Num8 => KeyCode::Digit(8),
        Key::Num9 => KeyCode::Digit(9),
        Key::Space => KeyCode::Space,
        Key::Enter => KeyCode::Enter,
        Key::Escape => KeyCode::Escape,
        Key::Tab => KeyCode::Tab,
        Key::Backspace => KeyCode::Backspace,
        Key::Delete => KeyCode::Delete,
        Key::Insert => KeyCode::Insert,
        Key::Home => KeyCode::Home,
        Key::End => KeyCode::End,
        Key::PageUp => KeyCode::PageUp,
        Key::PageDown => KeyCode::PageDown,
        Key::Up => KeyCode::Up,
        Key::Down => KeyCode::Down,
        Key::Left => KeyCode::Left,
        Key::Right => KeyCode::Right,
        Key::LeftShift => KeyCode::LeftShift,
        Key::RightShift => KeyCode::RightShift,
        Key::LeftControl => KeyCode::LeftControl,
        Key::RightControl => KeyCode::RightControl,
        Key::LeftAlt => KeyCode::LeftAlt,
        Key::RightAlt => KeyCode::RightAlt,
        other => {
            let code = other as i32;
            let f1 = Key::F1 as i32;
            if (f1..=Key::F25 as i32).contains(&code) {
                KeyCode::Function((code - f1 + 1) as u8)
            } else {
                KeyCode::Other(code)
            }
        }
    }
}
