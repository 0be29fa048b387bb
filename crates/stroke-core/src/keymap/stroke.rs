//! Keyboard stroke records as the interception driver expects them.
//!
//! A physical key is identified by its **scan code**: the number the keyboard
//! controller reports for a key *position*, regardless of the character the
//! active layout prints on it.  Some keys share a scan code with a key in the
//! primary cluster and are told apart by the *extended* (E0) prefix, e.g.
//! right Ctrl (`0x1D` + E0) versus left Ctrl (`0x1D`).
//!
//! # Wire layout
//!
//! [`KeyStroke`] is `#[repr(C)]` and mirrors `InterceptionKeyStroke`:
//!
//! | Field         | Type  | Notes                               |
//! |---------------|-------|-------------------------------------|
//! | `code`        | `u16` | set-1 scan code                     |
//! | `state`       | `u16` | [`KeyState`] value (0–3)            |
//! | `information` | `u32` | always 0 for synthesised strokes    |

use serde::{Deserialize, Serialize};

/// Transition carried by a keyboard stroke.
///
/// The numeric values are the driver's `INTERCEPTION_KEY_*` state bits:
/// bit 0 is "up", bit 1 is the E0 (extended) prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum KeyState {
    Down = 0,
    Up = 1,
    ExtendedDown = 2,
    ExtendedUp = 3,
}

impl KeyState {
    /// Returns the raw driver state value.
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// Returns `true` for [`KeyState::ExtendedDown`] and [`KeyState::ExtendedUp`].
    pub fn is_extended(self) -> bool {
        matches!(self, KeyState::ExtendedDown | KeyState::ExtendedUp)
    }

    /// Returns `true` for the two release states.
    pub fn is_release(self) -> bool {
        matches!(self, KeyState::Up | KeyState::ExtendedUp)
    }
}

/// One atomic keyboard event handed to the event sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(C)]
pub struct KeyStroke {
    pub code: u16,
    pub state: u16,
    pub information: u32,
}

impl KeyStroke {
    /// Builds a synthetic stroke (information field zeroed).
    pub const fn new(code: u16, state: KeyState) -> Self {
        Self {
            code,
            state: state as u16,
            information: 0,
        }
    }
}

/// A resolver table entry: one physical key with its press and release states.
///
/// Primary-cluster keys use the `Down`/`Up` pair, extended keys the
/// `ExtendedDown`/`ExtendedUp` pair.  The two states always share the same
/// extended flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub code: u16,
    pub down: KeyState,
    pub up: KeyState,
}

impl KeyBinding {
    /// A primary-cluster key (states 0/1).
    pub const fn base(code: u16) -> Self {
        Self {
            code,
            down: KeyState::Down,
            up: KeyState::Up,
        }
    }

    /// A key that needs the E0 prefix (states 2/3).
    pub const fn extended(code: u16) -> Self {
        Self {
            code,
            down: KeyState::ExtendedDown,
            up: KeyState::ExtendedUp,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.down.is_extended()
    }

    /// The stroke that presses this key.
    pub fn press(&self) -> KeyStroke {
        KeyStroke::new(self.code, self.down)
    }

    /// The stroke that releases this key.
    pub fn release(&self) -> KeyStroke {
        KeyStroke::new(self.code, self.up)
    }

    /// Returns the press stroke when `pressed`, otherwise the release stroke.
    pub fn stroke(&self, pressed: bool) -> KeyStroke {
        if pressed {
            self.press()
        } else {
            self.release()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_state_values_match_driver_constants() {
        assert_eq!(KeyState::Down.as_u16(), 0);
        assert_eq!(KeyState::Up.as_u16(), 1);
        assert_eq!(KeyState::ExtendedDown.as_u16(), 2);
        assert_eq!(KeyState::ExtendedUp.as_u16(), 3);
    }

    #[test]
    fn test_extended_binding_uses_e0_states_for_both_phases() {
        let binding = KeyBinding::extended(0x53);

        assert!(binding.is_extended());
        assert_eq!(binding.press(), KeyStroke { code: 0x53, state: 2, information: 0 });
        assert_eq!(binding.release(), KeyStroke { code: 0x53, state: 3, information: 0 });
    }

    #[test]
    fn test_base_binding_press_and_release() {
        let binding = KeyBinding::base(0x1E);

        assert!(!binding.is_extended());
        assert_eq!(binding.stroke(true).state, 0);
        assert_eq!(binding.stroke(false).state, 1);
        assert!(binding.up.is_release());
        assert!(!binding.down.is_release());
    }

    #[test]
    fn test_key_stroke_layout_matches_driver_record() {
        // u16 code + u16 state + u32 information
        assert_eq!(std::mem::size_of::<KeyStroke>(), 8);
        assert_eq!(std::mem::align_of::<KeyStroke>(), 4);
    }
}
