//! Named (non-character) keys and their scan codes.
//!
//! Named keys are addressed by short identifiers such as `"f1"`, `"lWin"` or
//! `"upArrow"`.  A token that spells a name is always treated as one atomic
//! key and never split into characters.
//!
//! Keys in the navigation cluster, the right-hand modifiers and the Windows /
//! context-menu keys carry the E0 prefix and therefore use the extended
//! state pair.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::stroke::KeyBinding;

/// Every key that is addressed by name rather than by the character it types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedKey {
    Escape,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    PrintScreen,
    ScrollLock,
    Pause,
    Backspace,
    Insert,
    Home,
    PageUp,
    Tab,
    Enter,
    Delete,
    End,
    PageDown,
    CapsLock,
    LeftShift,
    RightShift,
    LeftCtrl,
    RightCtrl,
    LeftWin,
    LeftAlt,
    Space,
    AltGr,
    ContextMenu,
    UpArrow,
    DownArrow,
    LeftArrow,
    RightArrow,
}

impl NamedKey {
    /// All named keys in table order.
    pub const ALL: [NamedKey; 39] = [
        NamedKey::Escape,
        NamedKey::F1,
        NamedKey::F2,
        NamedKey::F3,
        NamedKey::F4,
        NamedKey::F5,
        NamedKey::F6,
        NamedKey::F7,
        NamedKey::F8,
        NamedKey::F9,
        NamedKey::F10,
        NamedKey::F11,
        NamedKey::F12,
        NamedKey::PrintScreen,
        NamedKey::ScrollLock,
        NamedKey::Pause,
        NamedKey::Backspace,
        NamedKey::Insert,
        NamedKey::Home,
        NamedKey::PageUp,
        NamedKey::Tab,
        NamedKey::Enter,
        NamedKey::Delete,
        NamedKey::End,
        NamedKey::PageDown,
        NamedKey::CapsLock,
        NamedKey::LeftShift,
        NamedKey::RightShift,
        NamedKey::LeftCtrl,
        NamedKey::RightCtrl,
        NamedKey::LeftWin,
        NamedKey::LeftAlt,
        NamedKey::Space,
        NamedKey::AltGr,
        NamedKey::ContextMenu,
        NamedKey::UpArrow,
        NamedKey::DownArrow,
        NamedKey::LeftArrow,
        NamedKey::RightArrow,
    ];

    /// Looks up a key by its exact identifier (case-sensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let key = match name {
            "esc" => NamedKey::Escape,
            "f1" => NamedKey::F1,
            "f2" => NamedKey::F2,
            "f3" => NamedKey::F3,
            "f4" => NamedKey::F4,
            "f5" => NamedKey::F5,
            "f6" => NamedKey::F6,
            "f7" => NamedKey::F7,
            "f8" => NamedKey::F8,
            "f9" => NamedKey::F9,
            "f10" => NamedKey::F10,
            "f11" => NamedKey::F11,
            "f12" => NamedKey::F12,
            "prtSc" => NamedKey::PrintScreen,
            "scrLk" => NamedKey::ScrollLock,
            "pause" => NamedKey::Pause,
            "backspace" => NamedKey::Backspace,
            "insert" => NamedKey::Insert,
            "home" => NamedKey::Home,
            "pgUp" => NamedKey::PageUp,
            "tab" => NamedKey::Tab,
            "enter" => NamedKey::Enter,
            "delete" => NamedKey::Delete,
            "end" => NamedKey::End,
            "pgDn" => NamedKey::PageDown,
            "capslock" => NamedKey::CapsLock,
            "lShift" => NamedKey::LeftShift,
            "rShift" => NamedKey::RightShift,
            "lCtrl" => NamedKey::LeftCtrl,
            "rCtrl" => NamedKey::RightCtrl,
            "lWin" => NamedKey::LeftWin,
            "lAlt" => NamedKey::LeftAlt,
            "space" => NamedKey::Space,
            "altGr" => NamedKey::AltGr,
            "context" => NamedKey::ContextMenu,
            "upArrow" => NamedKey::UpArrow,
            "downArrow" => NamedKey::DownArrow,
            "leftArrow" => NamedKey::LeftArrow,
            "rightArrow" => NamedKey::RightArrow,
            _ => return None,
        };
        Some(key)
    }

    /// The identifier accepted by [`NamedKey::from_name`].
    pub fn name(self) -> &'static str {
        match self {
            NamedKey::Escape => "esc",
            NamedKey::F1 => "f1",
            NamedKey::F2 => "f2",
            NamedKey::F3 => "f3",
            NamedKey::F4 => "f4",
            NamedKey::F5 => "f5",
            NamedKey::F6 => "f6",
            NamedKey::F7 => "f7",
            NamedKey::F8 => "f8",
            NamedKey::F9 => "f9",
            NamedKey::F10 => "f10",
            NamedKey::F11 => "f11",
            NamedKey::F12 => "f12",
            NamedKey::PrintScreen => "prtSc",
            NamedKey::ScrollLock => "scrLk",
            NamedKey::Pause => "pause",
            NamedKey::Backspace => "backspace",
            NamedKey::Insert => "insert",
            NamedKey::Home => "home",
            NamedKey::PageUp => "pgUp",
            NamedKey::Tab => "tab",
            NamedKey::Enter => "enter",
            NamedKey::Delete => "delete",
            NamedKey::End => "end",
            NamedKey::PageDown => "pgDn",
            NamedKey::CapsLock => "capslock",
            NamedKey::LeftShift => "lShift",
            NamedKey::RightShift => "rShift",
            NamedKey::LeftCtrl => "lCtrl",
            NamedKey::RightCtrl => "rCtrl",
            NamedKey::LeftWin => "lWin",
            NamedKey::LeftAlt => "lAlt",
            NamedKey::Space => "space",
            NamedKey::AltGr => "altGr",
            NamedKey::ContextMenu => "context",
            NamedKey::UpArrow => "upArrow",
            NamedKey::DownArrow => "downArrow",
            NamedKey::LeftArrow => "leftArrow",
            NamedKey::RightArrow => "rightArrow",
        }
    }

    /// The physical key behind this name.
    pub fn binding(self) -> KeyBinding {
        match self {
            NamedKey::Escape => KeyBinding::base(0x01),
            NamedKey::F1 => KeyBinding::base(0x3B),
            NamedKey::F2 => KeyBinding::base(0x3C),
            NamedKey::F3 => KeyBinding::base(0x3D),
            NamedKey::F4 => KeyBinding::base(0x3E),
            NamedKey::F5 => KeyBinding::base(0x3F),
            NamedKey::F6 => KeyBinding::base(0x40),
            NamedKey::F7 => KeyBinding::base(0x41),
            NamedKey::F8 => KeyBinding::base(0x42),
            NamedKey::F9 => KeyBinding::base(0x43),
            NamedKey::F10 => KeyBinding::base(0x44),
            NamedKey::F11 => KeyBinding::base(0x57),
            NamedKey::F12 => KeyBinding::base(0x58),
            NamedKey::PrintScreen => KeyBinding::base(0x37),
            NamedKey::ScrollLock => KeyBinding::base(0x46),
            // Pause is reported through the Ctrl scan code.
            NamedKey::Pause => KeyBinding::base(0x1D),
            NamedKey::Backspace => KeyBinding::base(0x0E),
            NamedKey::Insert => KeyBinding::base(0x52),
            NamedKey::Home => KeyBinding::base(0x47),
            NamedKey::PageUp => KeyBinding::base(0x49),
            NamedKey::Tab => KeyBinding::base(0x0F),
            NamedKey::Enter => KeyBinding::base(0x1C),
            NamedKey::Delete => KeyBinding::extended(0x53),
            NamedKey::End => KeyBinding::extended(0x4F),
            NamedKey::PageDown => KeyBinding::extended(0x51),
            NamedKey::CapsLock => KeyBinding::base(0x3A),
            NamedKey::LeftShift => KeyBinding::base(0x2A),
            NamedKey::RightShift => KeyBinding::base(0x36),
            NamedKey::LeftCtrl => KeyBinding::base(0x1D),
            NamedKey::RightCtrl => KeyBinding::extended(0x1D),
            NamedKey::LeftWin => KeyBinding::extended(0x5B),
            NamedKey::LeftAlt => KeyBinding::base(0x38),
            NamedKey::Space => KeyBinding::base(0x39),
            NamedKey::AltGr => KeyBinding::extended(0x38),
            NamedKey::ContextMenu => KeyBinding::extended(0x5D),
            NamedKey::UpArrow => KeyBinding::extended(0x48),
            NamedKey::DownArrow => KeyBinding::extended(0x50),
            NamedKey::LeftArrow => KeyBinding::extended(0x4B),
            NamedKey::RightArrow => KeyBinding::extended(0x4D),
        }
    }
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a string is not a known key name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key name: {0:?}")]
pub struct UnknownKeyName(pub String);

impl FromStr for NamedKey {
    type Err = UnknownKeyName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NamedKey::from_name(s).ok_or_else(|| UnknownKeyName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_round_trips_through_from_name() {
        for key in NamedKey::ALL {
            assert_eq!(
                NamedKey::from_name(key.name()),
                Some(key),
                "name {:?} must map back to {key:?}",
                key.name()
            );
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert_eq!(NamedKey::from_name("lWin"), Some(NamedKey::LeftWin));
        assert_eq!(NamedKey::from_name("LWIN"), None);
        assert_eq!(NamedKey::from_name("F1"), None);
    }

    #[test]
    fn test_navigation_cluster_is_extended() {
        for key in [
            NamedKey::Delete,
            NamedKey::End,
            NamedKey::PageDown,
            NamedKey::UpArrow,
            NamedKey::DownArrow,
            NamedKey::LeftArrow,
            NamedKey::RightArrow,
        ] {
            assert!(key.binding().is_extended(), "{key} must be extended");
        }
    }

    #[test]
    fn test_right_ctrl_shares_code_with_left_ctrl_but_is_extended() {
        let left = NamedKey::LeftCtrl.binding();
        let right = NamedKey::RightCtrl.binding();

        assert_eq!(left.code, right.code);
        assert!(!left.is_extended());
        assert!(right.is_extended());
    }

    #[test]
    fn test_from_str_reports_unknown_name() {
        let err = "hyper".parse::<NamedKey>().unwrap_err();
        assert_eq!(err, UnknownKeyName("hyper".to_string()));
    }
}
