//! Key, button and axis identifiers

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    /// A key
    A,
    /// B key
    B,
    /// C key
    C,
    /// D key
    D,
    /// E key
    E,
    /// F key
    F,
    /// G key
    G,
    /// H key
    H,
    /// I key
    I,
    /// J key
    J,
    /// K key
    K,
    /// L key
    L,
    /// M key
    M,
    /// N key
    N,
    /// O key
    O,
    /// P key
    P,
    /// Q key
    Q,
    /// R key
    R,
    /// S key
    S,
    /// T key
    T,
    /// U key
    U,
    /// V key
    V,
    /// W key
    W,
    /// X key
    X,
    /// Y key
    Y,
    /// Z key
    Z,
    /// Number row 0-9
    Digit(u8),
    /// Space key
    Space,
    /// Enter key
    Enter,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Backspace key
    Backspace,
    /// Delete key
    Delete,
    /// Insert key
    Insert,
    /// Home key
    Home,
    /// End key
    End,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Left shift
    LeftShift,
    /// Right shift
    RightShift,
    /// Left control
    LeftControl,
    /// Right control
    RightControl,
    /// Left alt
    LeftAlt,
    /// Right alt
    RightAlt,
    /// Function keys F1-F25
    Function(u8),
    /// Any key without a dedicated variant, by platform code
    Other(i32),
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
    /// Extra buttons 4-8
    Extra(u8),
}

/// Game controller slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ControllerId(pub u8);

/// Gamepad buttons in the standard mapping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerButton {
    /// A / cross
    A,
    /// B / circle
    B,
    /// X / square
    X,
    /// Y / triangle
    Y,
    /// Left bumper
    LeftBumper,
    /// Right bumper
    RightBumper,
    /// Back / select
    Back,
    /// Start
    Start,
    /// Guide / home
    Guide,
    /// Left stick click
    LeftThumb,
    /// Right stick click
    RightThumb,
    /// D-pad up
    DpadUp,
    /// D-pad right
    DpadRight,
    /// D-pad down
    DpadDown,
    /// D-pad left
    DpadLeft,
}

impl ControllerButton {
    /// Every button, indexed like [`GamepadState::buttons`]
    pub const ALL: [Self; 15] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::LeftBumper,
        Self::RightBumper,
        Self::Back,
        Self::Start,
        Self::Guide,
        Self::LeftThumb,
        Self::RightThumb,
        Self::DpadUp,
        Self::DpadRight,
        Self::DpadDown,
        Self::DpadLeft,
    ];

    /// Index into [`GamepadState::buttons`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Gamepad axes in the standard mapping order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerAxis {
    /// Left stick horizontal
    LeftX,
    /// Left stick vertical
    LeftY,
    /// Right stick horizontal
    RightX,
    /// Right stick vertical
    RightY,
    /// Left trigger
    LeftTrigger,
    /// Right trigger
    RightTrigger,
}

impl ControllerAxis {
    /// Every axis, indexed like [`GamepadState::axes`]
    pub const ALL: [Self; 6] = [
        Self::LeftX,
        Self::LeftY,
        Self::RightX,
        Self::RightY,
        Self::LeftTrigger,
        Self::RightTrigger,
    ];

    /// Index into [`GamepadState::axes`]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Snapshot of one gamepad
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GamepadState {
    /// Button states
    pub buttons: [bool; 15],
    /// Axis positions in `[-1, 1]`
    pub axes: [f32; 6],
}
