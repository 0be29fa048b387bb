//! Character and key-name to scan-code translation.
//!
//! - [`stroke`] – driver-shaped keyboard records and table entries.
//! - [`named`] – keys addressed by name (`"f1"`, `"lWin"`, ...).
//! - [`layout`] – the four character layers of the keyboard layout.
//! - [`resolver`] – turns a token into the ordered keys that type it.

pub mod layout;
pub mod named;
pub mod resolver;
pub mod stroke;

pub use named::NamedKey;
pub use resolver::{resolve, resolve_char, resolve_str, KeyToken, ResolveError};
pub use stroke::{KeyBinding, KeyState, KeyStroke};
