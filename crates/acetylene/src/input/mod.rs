//! Input management system
//!
//! [`InputManager`] keeps a `(current, previous)` pair for every key, mouse
//! button and controller so queries can tell "held" apart from "just pressed"
//! and "just released". Platform callbacks feed it through the `press_*`,
//! `release_*`, `move_mouse`, `scroll_mouse` and controller methods; every
//! such change is also queued as an [`InputEvent`] for [`InputListener`]s.

mod codes;
pub mod hotplug;

pub use codes::{ControllerAxis, ControllerButton, ControllerId, GamepadState, KeyCode, MouseButton};
pub use hotplug::ControllerHotplug;

use crate::foundation::math::Vec2;
use crate::render::camera::Camera;
use hotplug::Removal;
use std::collections::{BTreeMap, HashMap};

/// A change in input state, in the order the platform reported it
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key went down
    KeyPressed(KeyCode),
    /// Key went up
    KeyReleased(KeyCode),
    /// Text input
    CharTyped(char),
    /// Mouse moved by the given delta
    MouseMoved(Vec2),
    /// Mouse button went down
    MouseButtonPressed(MouseButton),
    /// Mouse button went up
    MouseButtonReleased(MouseButton),
    /// Scroll wheel offset
    MouseScrolled(Vec2),
    /// Gamepad attached
    ControllerConnected(ControllerId),
    /// Gamepad detached
    ControllerDisconnected(ControllerId),
    /// Gamepad button went down
    ControllerButtonPressed(ControllerId, ControllerButton),
    /// Gamepad button went up
    ControllerButtonReleased(ControllerId, ControllerButton),
    /// Gamepad axis moved by the given delta
    ControllerAxisMoved(ControllerId, ControllerAxis, f32),
}

/// Receiver of input events. Every method defaults to doing nothing.
pub trait InputListener {
    /// A key went down
    fn key_pressed(&mut self, _key: KeyCode) {}
    /// A key went up
    fn key_released(&mut self, _key: KeyCode) {}
    /// A character was typed
    fn char_typed(&mut self, _c: char) {}
    /// The mouse moved by `delta` pixels
    fn mouse_moved(&mut self, _delta: Vec2) {}
    /// A mouse button went down
    fn mouse_button_pressed(&mut self, _button: MouseButton) {}
    /// A mouse button went up
    fn mouse_button_released(&mut self, _button: MouseButton) {}
    /// The scroll wheel moved
    fn mouse_scrolled(&mut self, _scroll: Vec2) {}
    /// A gamepad was attached
    fn controller_connected(&mut self, _controller: ControllerId) {}
    /// A gamepad was detached
    fn controller_disconnected(&mut self, _controller: ControllerId) {}
    /// A gamepad button went down
    fn controller_button_pressed(&mut self, _controller: ControllerId, _button: ControllerButton) {}
    /// A gamepad button went up
    fn controller_button_released(&mut self, _controller: ControllerId, _button: ControllerButton) {}
    /// A gamepad axis moved
    fn controller_axis_moved(&mut self, _controller: ControllerId, _axis: ControllerAxis, _delta: f32) {}

    /// Route an event to the matching callback
    fn on_input_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed(key) => self.key_pressed(key),
            InputEvent::KeyReleased(key) => self.key_released(key),
            InputEvent::CharTyped(c) => self.char_typed(c),
            InputEvent::MouseMoved(delta) => self.mouse_moved(delta),
            InputEvent::MouseButtonPressed(button) => self.mouse_button_pressed(button),
            InputEvent::MouseButtonReleased(button) => self.mouse_button_released(button),
            InputEvent::MouseScrolled(scroll) => self.mouse_scrolled(scroll),
            InputEvent::ControllerConnected(id) => self.controller_connected(id),
            InputEvent::ControllerDisconnected(id) => self.controller_disconnected(id),
            InputEvent::ControllerButtonPressed(id, button) => self.controller_button_pressed(id, button),
            InputEvent::ControllerButtonReleased(id, button) => self.controller_button_released(id, button),
            InputEvent::ControllerAxisMoved(id, axis, delta) => self.controller_axis_moved(id, axis, delta),
        }
    }
}

/// Platform side of input: pumps OS events into the manager and reports
/// gamepad snapshots.
pub trait InputSource {
    /// Deliver pending platform events through the manager's `press_*`,
    /// `move_mouse`, ... methods
    fn poll_events(&mut self, input: &mut InputManager);

    /// Current state of a gamepad, `None` if it is not present
    fn gamepad_state(&mut self, controller: ControllerId) -> Option<GamepadState>;
}

/// Input manager
pub struct InputManager {
    keys: HashMap<KeyCode, (bool, bool)>,
    mouse_buttons: HashMap<MouseButton, (bool, bool)>,
    mouse_position: (Vec2, Vec2),
    mouse_scroll: (Vec2, Vec2),
    mouse_enabled: bool,
    mouse_visible: bool,
    controllers: BTreeMap<ControllerId, (GamepadState, GamepadState)>,
    hotplug: ControllerHotplug,
    events: Vec<InputEvent>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            keys: HashMap::new(),
            mouse_buttons: HashMap::new(),
            mouse_position: (Vec2::zeros(), Vec2::zeros()),
            mouse_scroll: (Vec2::zeros(), Vec2::zeros()),
            mouse_enabled: true,
            mouse_visible: true,
            controllers: BTreeMap::new(),
            hotplug: ControllerHotplug::new(),
            events: Vec::new(),
        }
    }

    /// Advance one frame.
    ///
    /// Current state becomes previous state, the scroll offset resets, the
    /// platform is polled, queued controller removals are applied and every
    /// connected gamepad is sampled.
    pub fn update(&mut self, source: &mut dyn InputSource) {
        for state in self.keys.values_mut() {
            state.1 = state.0;
        }
        self.mouse_position.1 = self.mouse_position.0;
        for state in self.mouse_buttons.values_mut() {
            state.1 = state.0;
        }
        self.mouse_scroll.1 = self.mouse_scroll.0;
        self.mouse_scroll.0 = Vec2::zeros();

        source.poll_events(self);

        for removal in self.hotplug.drain() {
            if self.controllers.remove(&removal.controller).is_some() {
                log::info!("Removed controller {}", removal.controller.0);
                if !removal.announced {
                    self.events.push(InputEvent::ControllerDisconnected(removal.controller));
                }
            }
        }

        for (&id, states) in &mut self.controllers {
            let Some(sample) = source.gamepad_state(id) else {
                continue;
            };
            states.1 = states.0;
            states.0 = sample;
            for button in ControllerButton::ALL {
                let (now, was) = (states.0.buttons[button.index()], states.1.buttons[button.index()]);
                if now && !was {
                    self.events.push(InputEvent::ControllerButtonPressed(id, button));
                } else if !now && was {
                    self.events.push(InputEvent::ControllerButtonReleased(id, button));
                }
            }
            for axis in ControllerAxis::ALL {
                let delta = states.0.axes[axis.index()] - states.1.axes[axis.index()];
                if delta != 0.0 {
                    self.events.push(InputEvent::ControllerAxisMoved(id, axis, delta));
                }
            }
        }
    }

    /// Take the events queued since the last call
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Deliver every queued event to `listener`
    pub fn dispatch(&mut self, listener: &mut dyn InputListener) {
        for event in self.take_events() {
            listener.on_input_event(&event);
        }
    }

    /// Forget all state
    pub fn destroy(&mut self) {
        *self = Self {
            hotplug: self.hotplug.clone(),
            ..Self::new()
        };
        log::info!("Input manager reset");
    }

    /// Key is held this frame
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.0)
    }

    /// Key went down this frame
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.0 && !s.1)
    }

    /// Key went up this frame
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| !s.0 && s.1)
    }

    /// Key was held last frame
    pub fn was_key_down(&self, key: KeyCode) -> bool {
        self.keys.get(&key).is_some_and(|s| s.1)
    }

    /// Mouse input is being accepted
    pub fn is_mouse_enabled(&self) -> bool {
        self.mouse_enabled
    }

    /// Accept or ignore mouse input
    pub fn set_mouse_enabled(&mut self, enabled: bool) {
        self.mouse_enabled = enabled;
    }

    /// Cursor visibility requested from the platform
    pub fn is_mouse_visible(&self) -> bool {
        self.mouse_visible
    }

    /// Request the cursor be shown or hidden
    pub fn set_mouse_visible(&mut self, visible: bool) {
        self.mouse_visible = visible;
    }

    /// Mouse moved this frame
    pub fn is_mouse_moved(&self) -> bool {
        self.mouse_position.0 != self.mouse_position.1
    }

    /// Mouse position in window pixels, origin bottom-left
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position.0
    }

    /// Mouse position last frame
    pub fn prev_mouse_position(&self) -> Vec2 {
        self.mouse_position.1
    }

    /// Mouse position seen through `camera`
    pub fn mouse_position_in(&self, camera: &Camera, window_dims: Vec2) -> Vec2 {
        camera.world_point(self.mouse_position.0, window_dims)
    }

    /// Last frame's mouse position seen through `camera`
    pub fn prev_mouse_position_in(&self, camera: &Camera, window_dims: Vec2) -> Vec2 {
        camera.world_point(self.mouse_position.1, window_dims)
    }

    /// Mouse button is held
    pub fn is_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| s.0)
    }

    /// Mouse button went down this frame
    pub fn is_mouse_button_pressed(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| s.0 && !s.1)
    }

    /// Mouse button went up this frame
    pub fn is_mouse_button_released(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| !s.0 && s.1)
    }

    /// Mouse button was held last frame
    pub fn was_mouse_button_down(&self, button: MouseButton) -> bool {
        self.mouse_buttons.get(&button).is_some_and(|s| s.1)
    }

    /// Scroll wheel moved this frame
    pub fn is_mouse_scrolled(&self) -> bool {
        self.mouse_scroll.0 != self.mouse_scroll.1 && self.mouse_scroll.0 != Vec2::zeros()
    }

    /// Scroll offset this frame
    pub fn mouse_scroll(&self) -> Vec2 {
        self.mouse_scroll.0
    }

    /// Gamepad is attached
    pub fn is_controller_connected(&self, controller: ControllerId) -> bool {
        self.controllers.contains_key(&controller)
    }

    /// Attached gamepads in slot order
    pub fn controllers(&self) -> impl Iterator<Item = ControllerId> + '_ {
        self.controllers.keys().copied()
    }

    /// Gamepad button is held
    pub fn is_controller_button_down(&self, controller: ControllerId, button: ControllerButton) -> bool {
        self.controllers
            .get(&controller)
            .is_some_and(|s| s.0.buttons[button.index()])
    }

    /// Gamepad button went down this update
    pub fn is_controller_button_pressed(&self, controller: ControllerId, button: ControllerButton) -> bool {
        self.is_controller_button_down(controller, button) && !self.was_controller_button_down(controller, button)
    }

    /// Gamepad button went up this update
    pub fn is_controller_button_released(&self, controller: ControllerId, button: ControllerButton) -> bool {
        !self.is_controller_button_down(controller, button) && self.was_controller_button_down(controller, button)
    }

    /// Gamepad button was held last update
    pub fn was_controller_button_down(&self, controller: ControllerId, button: ControllerButton) -> bool {
        self.controllers
            .get(&controller)
            .is_some_and(|s| s.1.buttons[button.index()])
    }

    /// Gamepad axis changed this update
    pub fn is_controller_axis_moved(&self, controller: ControllerId, axis: ControllerAxis) -> bool {
        self.controllers
            .get(&controller)
            .is_some_and(|s| s.0.axes[axis.index()] != s.1.axes[axis.index()])
    }

    /// Gamepad axis position, 0 for unknown controllers
    pub fn controller_axis(&self, controller: ControllerId, axis: ControllerAxis) -> f32 {
        self.controllers
            .get(&controller)
            .map_or(0.0, |s| s.0.axes[axis.index()])
    }

    /// Gamepad axis position last update
    pub fn prev_controller_axis(&self, controller: ControllerId, axis: ControllerAxis) -> f32 {
        self.controllers
            .get(&controller)
            .map_or(0.0, |s| s.1.axes[axis.index()])
    }

    /// Handle onto the removal queue for platform threads
    pub fn hotplug(&self) -> ControllerHotplug {
        self.hotplug.clone()
    }

    /// Platform reports a key press
    pub fn press_key(&mut self, key: KeyCode) {
        self.keys.entry(key).or_insert((false, false)).0 = true;
        self.events.push(InputEvent::KeyPressed(key));
    }

    /// Platform reports a key release
    pub fn release_key(&mut self, key: KeyCode) {
        self.keys.entry(key).or_insert((false, true)).0 = false;
        self.events.push(InputEvent::KeyReleased(key));
    }

    /// Platform reports typed text
    pub fn type_char(&mut self, c: char) {
        self.events.push(InputEvent::CharTyped(c));
    }

    /// Platform reports the cursor at `position` (window pixels, origin bottom-left)
    pub fn move_mouse(&mut self, position: Vec2) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_position.0 = position;
        self.events
            .push(InputEvent::MouseMoved(position - self.mouse_position.1));
    }

    /// Platform reports a mouse button press
    pub fn press_mouse_button(&mut self, button: MouseButton) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_buttons.entry(button).or_insert((false, false)).0 = true;
        self.events.push(InputEvent::MouseButtonPressed(button));
    }

    /// Platform reports a mouse button release
    pub fn release_mouse_button(&mut self, button: MouseButton) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_buttons.entry(button).or_insert((false, true)).0 = false;
        self.events.push(InputEvent::MouseButtonReleased(button));
    }

    /// Platform reports scroll wheel movement
    pub fn scroll_mouse(&mut self, scroll: Vec2) {
        if !self.mouse_enabled {
            return;
        }
        self.mouse_scroll.0 = scroll;
        self.events.push(InputEvent::MouseScrolled(scroll));
    }

    /// Platform reports an attached gamepad
    pub fn connect_controller(&mut self, controller: ControllerId, state: GamepadState) {
        if self.controllers.contains_key(&controller) {
            return;
        }
        log::info!("Connecting controller {}", controller.0);
        self.controllers.insert(controller, (state, state));
        self.events.push(InputEvent::ControllerConnected(controller));
    }

    /// Platform reports a detached gamepad. The controller stays queryable
    /// until the next [`update`](Self::update).
    pub fn disconnect_controller(&mut self, controller: ControllerId) {
        if !self.controllers.contains_key(&controller) {
            return;
        }
        log::info!("Disconnecting controller {}", controller.0);
        self.events.push(InputEvent::ControllerDisconnected(controller));
        self.hotplug.push(Removal {
            controller,
            announced: true,
        });
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Source that replays scripted closures and fixed gamepad snapshots
    #[derive(Default)]
    struct ScriptedSource {
        frames: Vec<Vec<Box<dyn Fn(&mut InputManager)>>>,
        pads: HashMap<ControllerId, GamepadState>,
    }

    impl InputSource for ScriptedSource {
        fn poll_events(&mut self, input: &mut InputManager) {
            if self.frames.is_empty() {
                return;
            }
            for action in self.frames.remove(0) {
                action(input);
            }
        }

        fn gamepad_state(&mut self, controller: ControllerId) -> Option<GamepadState> {
            self.pads.get(&controller).copied()
        }
    }

    #[derive(Default)]
    struct Recorder {
        typed: String,
        disconnected: Vec<ControllerId>,
        pressed: Vec<ControllerButton>,
    }

    impl InputListener for Recorder {
        fn char_typed(&mut self, c: char) {
            self.typed.push(c);
        }
        fn controller_disconnected(&mut self, controller: ControllerId) {
            self.disconnected.push(controller);
        }
        fn controller_button_pressed(&mut self, _controller: ControllerId, button: ControllerButton) {
            self.pressed.push(button);
        }
    }

    #[test]
    fn test_key_edges() {
        let mut input = InputManager::new();
        let mut source = ScriptedSource::default();
        source.frames.push(vec![Box::new(|i| i.press_key(KeyCode::A))]);
        source.frames.push(vec![]);
        source.frames.push(vec![Box::new(|i| i.release_key(KeyCode::A))]);

        input.update(&mut source);
        assert!(input.is_key_down(KeyCode::A));
        assert!(input.is_key_pressed(KeyCode::A));

        input.update(&mut source);
        assert!(input.is_key_down(KeyCode::A));
        assert!(!input.is_key_pressed(KeyCode::A));

        input.update(&mut source);
        assert!(!input.is_key_down(KeyCode::A));
        assert!(input.is_key_released(KeyCode::A));
        assert!(!input.is_key_down(KeyCode::B));
        assert!(!input.is_key_released(KeyCode::B));
    }

    #[test]
    fn test_release_of_unseen_key_is_a_release_edge() {
        let mut input = InputManager::new();
        input.release_key(KeyCode::Escape);
        assert!(input.is_key_released(KeyCode::Escape));
    }

    #[test]
    fn test_disabled_mouse_ignores_input() {
        let mut input = InputManager::new();
        input.set_mouse_enabled(false);
        input.move_mouse(Vec2::new(10.0, 10.0));
        input.press_mouse_button(MouseButton::Left);
        input.scroll_mouse(Vec2::new(0.0, 1.0));
        assert_eq!(input.mouse_position(), Vec2::zeros());
        assert!(!input.is_mouse_button_down(MouseButton::Left));
        assert!(!input.is_mouse_scrolled());
        assert!(input.take_events().is_empty());
    }

    #[test]
    fn test_scroll_resets_each_update() {
        let mut input = InputManager::new();
        let mut source = ScriptedSource::default();
        input.scroll_mouse(Vec2::new(0.0, -1.0));
        assert!(input.is_mouse_scrolled());
        input.update(&mut source);
        assert_eq!(input.mouse_scroll(), Vec2::zeros());
        assert!(!input.is_mouse_scrolled());
    }

    #[test]
    fn test_mouse_moved_reports_delta() {
        let mut input = InputManager::new();
        input.move_mouse(Vec2::new(5.0, 7.0));
        assert!(input.is_mouse_moved());
        assert_eq!(input.take_events(), vec![InputEvent::MouseMoved(Vec2::new(5.0, 7.0))]);
    }

    #[test]
    fn test_dispatch_routes_chars() {
        let mut input = InputManager::new();
        input.type_char('h');
        input.type_char('i');
        let mut recorder = Recorder::default();
        input.dispatch(&mut recorder);
        assert_eq!(recorder.typed, "hi");
        assert!(input.take_events().is_empty());
    }

    #[test]
    fn test_disconnect_is_deferred_to_update() {
        let mut input = InputManager::new();
        let mut source = ScriptedSource::default();
        input.connect_controller(ControllerId(0), GamepadState::default());
        input.disconnect_controller(ControllerId(0));
        assert!(input.is_controller_connected(ControllerId(0)));

        input.update(&mut source);
        assert!(!input.is_controller_connected(ControllerId(0)));

        let mut recorder = Recorder::default();
        input.dispatch(&mut recorder);
        assert_eq!(recorder.disconnected, vec![ControllerId(0)]);
    }

    #[test]
    fn test_removal_from_another_thread_drains_at_update() {
        let mut input = InputManager::new();
        let mut source = ScriptedSource::default();
        input.connect_controller(ControllerId(2), GamepadState::default());
        input.take_events();

        let hotplug = input.hotplug();
        std::thread::spawn(move || hotplug.disconnect(ControllerId(2)))
            .join()
            .unwrap();
        assert!(input.is_controller_connected(ControllerId(2)));

        input.update(&mut source);
        assert!(!input.is_controller_connected(ControllerId(2)));
        assert_eq!(
            input.take_events(),
            vec![InputEvent::ControllerDisconnected(ControllerId(2))]
        );
    }

    #[test]
    fn test_controller_button_and_axis_events() {
        let mut input = InputManager::new();
        let mut source = ScriptedSource::default();
        let id = ControllerId(1);
        input.connect_controller(id, GamepadState::default());
        input.take_events();

        let mut pad = GamepadState::default();
        pad.buttons[ControllerButton::Start.index()] = true;
        pad.axes[ControllerAxis::LeftX.index()] = 0.5;
        source.pads.insert(id, pad);

        input.update(&mut source);
        assert!(input.is_controller_button_pressed(id, ControllerButton::Start));
        assert!(input.is_controller_axis_moved(id, ControllerAxis::LeftX));
        assert_eq!(input.controller_axis(id, ControllerAxis::LeftX), 0.5);

        let mut recorder = Recorder::default();
        input.dispatch(&mut recorder);
        assert_eq!(recorder.pressed, vec![ControllerButton::Start]);

        input.update(&mut source);
        assert!(input.is_controller_button_down(id, ControllerButton::Start));
        assert!(!input.is_controller_button_pressed(id, ControllerButton::Start));
        assert!(!input.is_controller_axis_moved(id, ControllerAxis::LeftX));
    }

    #[test]
    fn test_connect_twice_is_ignored() {
        let mut input = InputManager::new();
        input.connect_controller(ControllerId(0), GamepadState::default());
        input.connect_controller(ControllerId(0), GamepadState::default());
        assert_eq!(input.take_events().len(), 1);
        assert_eq!(input.controllers().count(), 1);
    }
}
