//! ToUnicode CMap parser.
//!
//! A ToUnicode CMap maps character codes to Unicode strings. Stat sheet
//! exports that subset their fonts rely on it to make digits and names
//! readable at all.

use regex::Regex;
use std::collections::HashMap;

/// Character code to Unicode string.
pub type CMap = HashMap<u32, String>;

/// Upper bound on entries expanded from one `bfrange` line.
const MAX_RANGE_ENTRIES: u32 = 0xFFFF;

lazy_static::lazy_static! {
    static ref BFCHAR: Regex = Regex::new(r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]*)>").unwrap();
    static ref BFRANGE: Regex = Regex::new(
        r"<([0-9A-Fa-f]+)>\s*<([0-9A-Fa-f]+)>\s*(?:<([0-9A-Fa-f]*)>|\[([^\]]*)\])"
    ).unwrap();
    static ref HEX: Regex = Regex::new(r"<([0-9A-Fa-f]*)>").unwrap();
}

/// Parse a ToUnicode CMap stream.
///
/// Both `bfchar` and `bfrange` sections are read; a range destination may be
/// a starting code or an array of individual strings.
///
/// # Examples
///
/// ```
/// use statsheet::fonts::parse_tounicode_cmap;
///
/// let data = b"beginbfchar\n<01> <0041>\nendbfchar\nbeginbfrange\n<10> <12> <0030>\nendbfrange";
/// let cmap = parse_tounicode_cmap(data);
/// assert_eq!(cmap.get(&0x01).map(String::as_str), Some("A"));
/// assert_eq!(cmap.get(&0x12).map(String::as_str), Some("2"));
/// ```
pub fn parse_tounicode_cmap(data: &[u8]) -> CMap {
    let mut cmap = CMap::new();
    let content = String::from_utf8_lossy(data);

    for section in extract_sections(&content, "beginbfchar", "endbfchar") {
        for caps in BFCHAR.captures_iter(section) {
            let (Ok(src), Some(dst)) = (u32::from_str_radix(&caps[1], 16), utf16_hex(&caps[2])) else {
                continue;
            };
            cmap.insert(src, dst);
        }
    }

    for section in extract_sections(&content, "beginbfrange", "endbfrange") {
        for caps in BFRANGE.captures_iter(section) {
            let (Ok(lo), Ok(hi)) = (
                u32::from_str_radix(&caps[1], 16),
                u32::from_str_radix(&caps[2], 16),
            ) else {
                continue;
            };
            if hi < lo || hi - lo > MAX_RANGE_ENTRIES {
                log::warn!("ToUnicode bfrange 0x{:X}-0x{:X} rejected", lo, hi);
                continue;
            }

            if let Some(start) = caps.get(3) {
                insert_incrementing_range(&mut cmap, lo, hi, start.as_str());
            } else if let Some(array) = caps.get(4) {
                for (offset, item) in HEX.captures_iter(array.as_str()).enumerate() {
                    let code = lo + offset as u32;
                    if code > hi {
                        break;
                    }
                    if let Some(dst) = utf16_hex(&item[1]) {
                        cmap.insert(code, dst);
                    }
                }
            }
        }
    }

    log::trace!("ToUnicode CMap parsed with {} entries", cmap.len());
    cmap
}

/// `<lo> <hi> <dst>`: the last UTF-16 unit of `dst` increments per code.
fn insert_incrementing_range(cmap: &mut CMap, lo: u32, hi: u32, dst_hex: &str) {
    let Some(mut units) = utf16_units(dst_hex) else {
        return;
    };
    if units.is_empty() {
        return;
    }
    let last = units.len() - 1;
    let base = units[last];
    for code in lo..=hi {
        units[last] = base.wrapping_add((code - lo) as u16);
        cmap.insert(code, String::from_utf16_lossy(&units));
    }
}

fn utf16_units(hex: &str) -> Option<Vec<u16>> {
    if hex.len() % 4 != 0 {
        // Single-byte destinations such as <41> are seen in the wild.
        return u32::from_str_radix(hex, 16).ok().map(|v| vec![v as u16]);
    }
    (0..hex.len())
        .step_by(4)
        .map(|i| u16::from_str_radix(&hex[i..i + 4], 16).ok())
        .collect()
}

/// Decode a destination written as UTF-16BE hex.
fn utf16_hex(hex: &str) -> Option<String> {
    let units = utf16_units(hex)?;
    if units.is_empty() {
        return None;
    }
    Some(String::from_utf16_lossy(&units))
}

fn extract_sections<'a>(content: &'a str, begin: &str, end: &str) -> Vec<&'a str> {
    let mut sections = Vec::new();
    let mut remaining = content;

    while let Some(begin_pos) = remaining.find(begin) {
        let after_begin = &remaining[begin_pos + begin.len()..];
        match after_begin.find(end) {
            Some(end_pos) => {
                sections.push(&after_begin[..end_pos]);
                remaining = &after_begin[end_pos + end.len()..];
            },
            None => break,
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bfchar_multiple_per_line() {
        let cmap = parse_tounicode_cmap(b"2 beginbfchar <03> <0020> <04> <0031>\nendbfchar");
        assert_eq!(cmap.get(&3).map(String::as_str), Some(" "));
        assert_eq!(cmap.get(&4).map(String::as_str), Some("1"));
    }

    #[test]
    fn test_bfrange_array() {
        let cmap = parse_tounicode_cmap(b"beginbfrange\n<0005> <0006> [<0041> <00660069>]\nendbfrange");
        assert_eq!(cmap.get(&5).map(String::as_str), Some("A"));
        assert_eq!(cmap.get(&6).map(String::as_str), Some("fi"));
    }

    #[test]
    fn test_surrogate_pair_destination() {
        let cmap = parse_tounicode_cmap(b"beginbfchar <01> <D835DF0C> endbfchar");
        assert_eq!(cmap.get(&1).map(String::as_str), Some("\u{1D70C}"));
    }

    #[test]
    fn test_inverted_range_ignored() {
        let cmap = parse_tounicode_cmap(b"beginbfrange <20> <10> <0041> endbfrange");
        assert!(cmap.is_empty());
    }

    #[test]
    fn test_unterminated_section_ignored() {
        assert!(parse_tounicode_cmap(b"beginbfchar <01> <0041>").is_empty());
    }
}
