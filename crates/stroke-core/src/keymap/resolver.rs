//! Scan-code resolution: logical key token → ordered physical keys.
//!
//! A caller asks for a *token*: a key name (`"f1"`, `"lWin"`), a single
//! character (`"é"`), or a run of characters (`"Hi!"`).  The resolver answers
//! with the list of [`KeyBinding`]s that must be held down, in order, to
//! reproduce it.  A modifier always precedes the key it modifies:
//!
//! ```text
//! "a"  -> [a]
//! "Á"  -> [Shift, á]
//! "@"  -> [AltGr, v]
//! "aB" -> [a, Shift, b]
//! ```
//!
//! # Layer order
//!
//! Characters are looked up first-match-wins in this order:
//!
//! 1. base layer
//! 2. shifted letters
//! 3. shifted symbols
//! 4. AltGr symbols
//! 5. the base layer again with the character lowercased
//!
//! Some characters appear in more than one layer; the order above decides.
//! Resolution is a pure function of the token.

use std::fmt;

use thiserror::Error;

use super::layout::{alt_gr_symbol, base_binding, shifted_letter, shifted_symbol, ALT_GR, SHIFT};
use super::named::NamedKey;
use super::stroke::KeyBinding;

/// Error returned when a token cannot be typed on the layout.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No layer produces this character.
    #[error("no mapping for character {0:?}")]
    UnmappedCharacter(char),

    /// The token contains no characters at all.
    #[error("empty key token")]
    EmptyToken,
}

/// A parsed logical key request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyToken {
    /// A key addressed by name; never split into characters.
    Named(NamedKey),
    /// One Unicode scalar value.
    Char(char),
    /// Several characters resolved one after another.
    Text(String),
}

impl KeyToken {
    /// Classifies a raw token string.
    ///
    /// Key names take precedence, so `"f1"` is the F1 key and not the two
    /// characters `f` and `1`.
    pub fn parse(token: &str) -> Self {
        if let Some(named) = NamedKey::from_name(token) {
            return KeyToken::Named(named);
        }
        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => KeyToken::Char(c),
            _ => KeyToken::Text(token.to_string()),
        }
    }
}

impl From<&str> for KeyToken {
    fn from(token: &str) -> Self {
        KeyToken::parse(token)
    }
}

impl From<char> for KeyToken {
    fn from(c: char) -> Self {
        KeyToken::Char(c)
    }
}

impl From<NamedKey> for KeyToken {
    fn from(key: NamedKey) -> Self {
        KeyToken::Named(key)
    }
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Named(key) => write!(f, "{key}"),
            KeyToken::Char(c) => write!(f, "{c:?}"),
            KeyToken::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// Resolves a token to the keys that produce it, modifiers first.
///
/// # Errors
///
/// Returns [`ResolveError::UnmappedCharacter`] for the first character no
/// layer can produce, and [`ResolveError::EmptyToken`] for `""`.
pub fn resolve(token: &KeyToken) -> Result<Vec<KeyBinding>, ResolveError> {
    match token {
        KeyToken::Named(key) => Ok(vec![key.binding()]),
        KeyToken::Char(c) => resolve_char(*c),
        KeyToken::Text(text) => {
            if text.is_empty() {
                return Err(ResolveError::EmptyToken);
            }
            let mut bindings = Vec::with_capacity(text.len());
            for c in text.chars() {
                bindings.extend(resolve_char(c)?);
            }
            Ok(bindings)
        }
    }
}

/// Parses and resolves a raw token string in one step.
///
/// # Errors
///
/// See [`resolve`].
pub fn resolve_str(token: &str) -> Result<Vec<KeyBinding>, ResolveError> {
    resolve(&KeyToken::parse(token))
}

/// Resolves a single character to one key or a modifier + key pair.
///
/// # Errors
///
/// Returns [`ResolveError::UnmappedCharacter`] when no layer matches.
pub fn resolve_char(c: char) -> Result<Vec<KeyBinding>, ResolveError> {
    if let Some(binding) = base_binding(c) {
        return Ok(vec![binding]);
    }
    if let Some(binding) = shifted_letter(c).and_then(base_binding) {
        return Ok(vec![SHIFT, binding]);
    }
    if let Some(binding) = shifted_symbol(c).and_then(base_binding) {
        return Ok(vec![SHIFT, binding]);
    }
    if let Some(binding) = alt_gr_symbol(c).and_then(base_binding) {
        return Ok(vec![ALT_GR, binding]);
    }
    if let Some(binding) = single_lowercase(c).and_then(base_binding) {
        return Ok(vec![binding]);
    }
    Err(ResolveError::UnmappedCharacter(c))
}

/// Lowercase form of `c` when it is a single character.
fn single_lowercase(c: char) -> Option<char> {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) if l != c => Some(l),
        _ => None,
    }
}
