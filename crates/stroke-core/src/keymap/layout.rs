//! Character layers of the Hungarian 102-key layout.
//!
//! Each printable character is produced by exactly one physical key plus an
//! optional modifier.  The layout is described by four tables:
//!
//! | Layer            | Modifier | Example              |
//! |------------------|----------|----------------------|
//! | base             | none     | `a`, `ö`, `1`, `-`   |
//! | shifted letters  | Shift    | `A` → `a`, `Ő` → `ő` |
//! | shifted symbols  | Shift    | `!` → `4`, `?` → `,` |
//! | AltGr symbols    | AltGr    | `@` → `v`, `€` → `u` |
//!
//! The three modifier layers map a character to the *base character* whose key
//! produces it; [`base_binding`] then turns that base character into a scan code.
//!
//! The layout places `0` left of `1` (scan code 0x29) and swaps `y`/`z`
//! relative to US QWERTY.

use super::stroke::KeyBinding;

/// Left Shift, used for both shift layers.
pub const SHIFT: KeyBinding = KeyBinding::base(0x2A);

/// AltGr (right Alt, E0-prefixed), the secondary modifier.
pub const ALT_GR: KeyBinding = KeyBinding::extended(0x38);

/// Unshifted characters, including the literal whitespace characters.
pub fn base_binding(c: char) -> Option<KeyBinding> {
    let code = match c {
        '0' => 0x29,
        '1' => 0x02,
        '2' => 0x03,
        '3' => 0x04,
        '4' => 0x05,
        '5' => 0x06,
        '6' => 0x07,
        '7' => 0x08,
        '8' => 0x09,
        '9' => 0x0A,
        'a' => 0x1E,
        'á' => 0x28,
        'b' => 0x30,
        'c' => 0x2E,
        'd' => 0x20,
        'e' => 0x12,
        // Shares the `i` position in the reference table.
        'é' => 0x17,
        'f' => 0x21,
        'g' => 0x22,
        'h' => 0x23,
        'i' => 0x17,
        'í' => 0x56,
        'j' => 0x24,
        'k' => 0x25,
        'l' => 0x26,
        'm' => 0x32,
        'n' => 0x31,
        'o' => 0x18,
        'ő' => 0x1A,
        'ö' => 0x0B,
        'ó' => 0x0D,
        'p' => 0x19,
        'q' => 0x10,
        'r' => 0x13,
        's' => 0x1F,
        't' => 0x14,
        'u' => 0x16,
        'ú' => 0x1B,
        'ű' => 0x2B,
        'ü' => 0x0C,
        'v' => 0x2F,
        'w' => 0x11,
        'x' => 0x2D,
        'y' => 0x2C,
        'z' => 0x15,
        ',' => 0x33,
        '.' => 0x34,
        '-' => 0x35,
        '\t' => 0x0F,
        '\n' => 0x1C,
        ' ' => 0x39,
        _ => return None,
    };
    Some(KeyBinding::base(code))
}

/// Uppercase letters, mapped to the lowercase letter on the same key.
pub fn shifted_letter(c: char) -> Option<char> {
    let base = match c {
        'A' => 'a',
        'Á' => 'á',
        'B' => 'b',
        'C' => 'c',
        'D' => 'd',
        'E' => 'e',
        'É' => 'é',
        'F' => 'f',
        'G' => 'g',
        'H' => 'h',
        'I' => 'i',
        'Í' => 'í',
        'J' => 'j',
        'K' => 'k',
        'L' => 'l',
        'M' => 'm',
        'N' => 'n',
        'O' => 'o',
        'Ó' => 'ó',
        'Ö' => 'ö',
        'Ő' => 'ő',
        'P' => 'p',
        'Q' => 'q',
        'R' => 'r',
        'S' => 's',
        'T' => 't',
        'U' => 'u',
        'Ú' => 'ú',
        'Ü' => 'ü',
        'Ű' => 'ű',
        'V' => 'v',
        'W' => 'w',
        'X' => 'x',
        'Y' => 'y',
        'Z' => 'z',
        _ => return None,
    };
    Some(base)
}

/// Symbols on the shifted digit row and punctuation keys.
pub fn shifted_symbol(c: char) -> Option<char> {
    let base = match c {
        '"' => '2',
        '_' => '-',
        ':' => '.',
        '!' => '4',
        '?' => ',',
        '\'' => '1',
        '(' => '8',
        ')' => '9',
        '§' => '0',
        '/' => '6',
        '%' => '5',
        '+' => '3',
        '=' => '7',
        _ => return None,
    };
    Some(base)
}

/// Symbols and extra letters reached through AltGr.
///
/// `Í` and `í` are listed for completeness but are always resolved by an
/// earlier layer.
pub fn alt_gr_symbol(c: char) -> Option<char> {
    let base = match c {
        ';' => ',',
        '[' => 'f',
        ']' => 'g',
        '{' => 'b',
        '}' => 'n',
        '@' => 'v',
        '*' => '-',
        '\\' => 'q',
        '&' => 'c',
        '#' => 'x',
        '`' => '7',
        '´' => '9',
        '^' => '3',
        '˘' => '4',
        '˙' => '8',
        '¨' => 'ü',
        '˝' => 'ö',
        '¸' => 'ó',
        '˛' => '6',
        'ˇ' => '2',
        '°' => '5',
        '÷' => 'ő',
        '×' => 'ú',
        '<' => 'í',
        '>' => 'y',
        '|' => 'w',
        '~' => '1',
        '¤' => 'ű',
        '$' => 'é',
        '€' => 'u',
        'ä' => 'a',
        'Ä' => 'e',
        'Đ' => 'd',
        'đ' => 's',
        'Í' => 'i',
        'í' => 'j',
        'ł' => 'k',
        'Ł' => 'l',
        'ß' => 'á',
        _ => return None,
    };
    Some(base)
}
