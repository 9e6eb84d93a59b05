//! Single-byte font encodings.
//!
//! Fonts without a ToUnicode CMap fall back to their `/Encoding`, which for
//! stat sheet exports is almost always WinAnsiEncoding, optionally patched
//! with a `/Differences` array of glyph names.

use std::collections::HashMap;

/// WinAnsiEncoding code points for bytes 0x80..=0x9F; the rest of the table
/// coincides with Latin-1. Zero marks an undefined slot.
const WIN_ANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021, 0x02C6, 0x2030, 0x0160, 0x2039,
    0x0152, 0, 0x017D, 0, 0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014, 0x02DC,
    0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Decode a byte with WinAnsiEncoding.
///
/// ```
/// use statsheet::fonts::encoding::winansi_char;
///
/// assert_eq!(winansi_char(b'7'), Some('7'));
/// assert_eq!(winansi_char(0x96), Some('\u{2013}'));
/// assert_eq!(winansi_char(0x81), None);
/// ```
pub fn winansi_char(code: u8) -> Option<char> {
    match code {
        0x80..=0x9F => match WIN_ANSI_HIGH[(code - 0x80) as usize] {
            0 => None,
            cp => char::from_u32(cp as u32),
        },
        0x00..=0x1F => None,
        _ => Some(code as char),
    }
}

/// Map an Adobe glyph name to its character.
///
/// Covers the names stat sheet fonts actually put in `/Differences`:
/// ASCII letters and digits, punctuation, and `uniXXXX` forms.
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    if name.len() == 1 {
        return name.chars().next();
    }
    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            return u32::from_str_radix(hex, 16).ok().and_then(char::from_u32);
        }
    }
    let c = match name {
        "zero" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        "space" | "nbspace" => ' ',
        "period" => '.',
        "comma" => ',',
        "hyphen" | "minus" => '-',
        "endash" => '\u{2013}',
        "emdash" => '\u{2014}',
        "slash" => '/',
        "colon" => ':',
        "semicolon" => ';',
        "parenleft" => '(',
        "parenright" => ')',
        "numbersign" => '#',
        "percent" => '%',
        "ampersand" => '&',
        "quotesingle" => '\'',
        "quoteright" => '\u{2019}',
        "quoteleft" => '\u{2018}',
        "quotedbl" => '"',
        "asterisk" => '*',
        "plus" => '+',
        "equal" => '=',
        "underscore" => '_',
        "bracketleft" => '[',
        "bracketright" => ']',
        "exclam" => '!',
        "question" => '?',
        "at" => '@',
        "eacute" => 'é',
        "aacute" => 'á',
        "iacute" => 'í',
        "oacute" => 'ó',
        "uacute" => 'ú',
        "ntilde" => 'ñ',
        "udieresis" => 'ü',
        _ => return None,
    };
    Some(c)
}

/// Parse a `/Differences` array: an integer sets the next code, each name
/// assigns the current code and advances it.
pub fn parse_differences(items: &[crate::object::Object]) -> HashMap<u8, char> {
    let mut map = HashMap::new();
    let mut code: i64 = 0;
    for item in items {
        if let Some(n) = item.as_integer() {
            code = n;
        } else if let Some(name) = item.as_name() {
            if let (Ok(byte), Some(c)) = (u8::try_from(code), glyph_name_to_char(name)) {
                map.insert(byte, c);
            }
            code += 1;
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::Object;

    #[test]
    fn test_winansi_latin1_range() {
        assert_eq!(winansi_char(0xE9), Some('é'));
        assert_eq!(winansi_char(b' '), Some(' '));
        assert_eq!(winansi_char(0x0A), None);
    }

    #[test]
    fn test_glyph_names() {
        assert_eq!(glyph_name_to_char("seven"), Some('7'));
        assert_eq!(glyph_name_to_char("uni0041"), Some('A'));
        assert_eq!(glyph_name_to_char("g123"), None);
    }

    #[test]
    fn test_differences_array() {
        let items = vec![
            Object::Integer(1),
            Object::Name("one".to_string()),
            Object::Name("two".to_string()),
            Object::Integer(40),
            Object::Name("space".to_string()),
        ];
        let map = parse_differences(&items);
        assert_eq!(map.get(&1), Some(&'1'));
        assert_eq!(map.get(&2), Some(&'2'));
        assert_eq!(map.get(&40), Some(&' '));
    }
}
