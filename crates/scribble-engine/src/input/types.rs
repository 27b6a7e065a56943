use std::fmt;

/// Keyboard key identifier, by physical position.
///
/// Letters are reported lowercase and digits by value so bindings do not
/// depend on the active keyboard layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Backspace,
    Delete,

    Shift,
    Control,
    Alt,
    Meta,

    /// `a`..=`z`.
    Letter(char),
    /// Top-row digit `0`..=`9`.
    Digit(u8),

    /// Any key not represented here.
    Unknown,
}

/// Press/release transition shared by keys and mouse buttons.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ButtonState {
    Pressed,
    Released,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
    Other(u16),
}

/// Modifier keys state.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Wheel movement. Positive `y` scrolls up (away from the user).
///
/// `Line` comes from notched wheels, `Pixel` from touchpads and other high
/// precision devices.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum WheelDelta {
    Line { x: f32, y: f32 },
    Pixel { x: f32, y: f32 },
}

impl WheelDelta {
    /// Vertical component, whatever the unit.
    #[inline]
    pub fn vertical(&self) -> f32 {
        match *self {
            WheelDelta::Line { y, .. } | WheelDelta::Pixel { y, .. } => y,
        }
    }
}

/// Platform-agnostic input events. Positions are client pixels, top-left
/// origin.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    ModifiersChanged(Modifiers),

    Key {
        key: Key,
        state: ButtonState,
        /// True when generated by key auto-repeat.
        repeat: bool,
    },

    PointerMoved { x: f32, y: f32 },

    PointerButton {
        button: MouseButton,
        state: ButtonState,
        x: f32,
        y: f32,
    },

    /// Wheel scrolled with the pointer at `(x, y)`.
    Wheel { delta: WheelDelta, x: f32, y: f32 },

    /// Pointer left the surface.
    PointerLeft,

    /// Window focus change.
    Focused(bool),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Letter(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::Digit(d) => write!(f, "{d}"),
            other => write!(f, "{other:?}"),
        }
    }
}
