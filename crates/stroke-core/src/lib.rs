//! # stroke-core
//!
//! Shared library for Stroke-Inject containing the scan-code translation
//! tables and the keyboard/mouse stroke records handed to the interception
//! driver.
//!
//! It has zero dependencies on OS APIs or the driver itself; everything here
//! is pure data and pure functions.
//!
//! # Architecture overview
//!
//! A hardware keyboard does not send characters.  It sends *scan codes*:
//! numbers identifying which physical key moved, and whether it went down or
//! up.  To make the host type `"Á"` we therefore have to work out which keys a
//! person would press (Shift, then the `á` key) and emit one stroke for every
//! transition.
//!
//! - **`keymap`** – Translates key names and Unicode characters into ordered
//!   lists of physical keys, honouring the layout's Shift and AltGr layers.
//!
//! - **`mouse`** – Button, wheel and motion records.  Mouse input needs no
//!   translation; this module only fixes the driver's record shape and state
//!   values.

pub mod keymap;
pub mod mouse;

pub use keymap::{
    resolve, resolve_char, resolve_str, KeyBinding, KeyState, KeyStroke, KeyToken, NamedKey,
    ResolveError,
};
pub use mouse::{InvalidButton, MouseButton, MouseState, MouseStroke, MoveMode};
