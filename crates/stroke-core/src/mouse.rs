//! Mouse stroke records.
//!
//! Mouse semantics do not depend on the keyboard layout, so there is nothing
//! to resolve: a request maps directly onto one [`MouseStroke`].
//!
//! [`MouseStroke`] is `#[repr(C)]` and mirrors `InterceptionMouseStroke`
//! (`state`, `flags`, `rolling`, `x`, `y`, `information`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five buttons the driver can press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left button.
    #[serde(rename = "BUTTON_1")]
    Button1,
    /// Right button.
    #[serde(rename = "BUTTON_2")]
    Button2,
    /// Middle button.
    #[serde(rename = "BUTTON_3")]
    Button3,
    /// First side (back) button.
    #[serde(rename = "BUTTON_4")]
    Button4,
    /// Second side (forward) button.
    #[serde(rename = "BUTTON_5")]
    Button5,
}

impl MouseButton {
    pub const ALL: [MouseButton; 5] = [
        MouseButton::Button1,
        MouseButton::Button2,
        MouseButton::Button3,
        MouseButton::Button4,
        MouseButton::Button5,
    ];

    /// The identifier accepted by [`MouseButton::from_str`].
    pub fn name(self) -> &'static str {
        match self {
            MouseButton::Button1 => "BUTTON_1",
            MouseButton::Button2 => "BUTTON_2",
            MouseButton::Button3 => "BUTTON_3",
            MouseButton::Button4 => "BUTTON_4",
            MouseButton::Button5 => "BUTTON_5",
        }
    }

    /// State for pressing (`true`) or releasing (`false`) this button.
    pub fn state(self, pressed: bool) -> MouseState {
        match (self, pressed) {
            (MouseButton::Button1, true) => MouseState::Button1Down,
            (MouseButton::Button1, false) => MouseState::Button1Up,
            (MouseButton::Button2, true) => MouseState::Button2Down,
            (MouseButton::Button2, false) => MouseState::Button2Up,
            (MouseButton::Button3, true) => MouseState::Button3Down,
            (MouseButton::Button3, false) => MouseState::Button3Up,
            (MouseButton::Button4, true) => MouseState::Button4Down,
            (MouseButton::Button4, false) => MouseState::Button4Up,
            (MouseButton::Button5, true) => MouseState::Button5Down,
            (MouseButton::Button5, false) => MouseState::Button5Up,
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for a button identifier outside `BUTTON_1`..`BUTTON_5`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid button {0:?}; use BUTTON_1, BUTTON_2, BUTTON_3, BUTTON_4, BUTTON_5")]
pub struct InvalidButton(pub String);

impl FromStr for MouseButton {
    type Err = InvalidButton;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MouseButton::ALL
            .into_iter()
            .find(|button| button.name() == s)
            .ok_or_else(|| InvalidButton(s.to_string()))
    }
}

/// Driver `INTERCEPTION_MOUSE_*` state values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum MouseState {
    Move = 0x000,
    Button1Down = 0x001,
    Button1Up = 0x002,
    Button2Down = 0x004,
    Button2Up = 0x008,
    Button3Down = 0x010,
    Button3Up = 0x020,
    Button4Down = 0x040,
    Button4Up = 0x080,
    Button5Down = 0x100,
    Button5Up = 0x200,
    Wheel = 0x400,
    HorizontalWheel = 0x800,
}

/// How `x`/`y` of a move stroke are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MoveMode {
    /// `x`/`y` are deltas from the current position.
    Relative,
    /// `x`/`y` are normalised coordinates in `0..=65535`.
    #[default]
    Absolute,
}

impl MoveMode {
    /// Driver `INTERCEPTION_MOUSE_MOVE_*` flag value.
    pub fn flags(self) -> u16 {
        match self {
            MoveMode::Relative => 0x000,
            MoveMode::Absolute => 0x001,
        }
    }
}

/// One atomic mouse event handed to the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct MouseStroke {
    pub state: u16,
    pub flags: u16,
    pub rolling: i16,
    pub x: i32,
    pub y: i32,
    pub information: u32,
}

impl MouseStroke {
    fn with_state(state: MouseState) -> Self {
        Self {
            state: state as u16,
            flags: 0,
            rolling: 0,
            x: 0,
            y: 0,
            information: 0,
        }
    }

    /// Cursor motion.
    pub fn movement(x: i32, y: i32, mode: MoveMode) -> Self {
        Self {
            flags: mode.flags(),
            x,
            y,
            ..Self::with_state(MouseState::Move)
        }
    }

    /// Button press or release.
    pub fn button(button: MouseButton, pressed: bool) -> Self {
        Self::with_state(button.state(pressed))
    }

    /// Vertical wheel; positive rolls away from the user.
    pub fn wheel(amount: i16) -> Self {
        Self {
            rolling: amount,
            ..Self::with_state(MouseState::Wheel)
        }
    }

    /// Horizontal wheel; positive rolls right.
    pub fn horizontal_wheel(amount: i16) -> Self {
        Self {
            rolling: amount,
            ..Self::with_state(MouseState::HorizontalWheel)
        }
    }
}
