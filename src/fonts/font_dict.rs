//! Font dictionary parsing.
//!
//! Only what text placement needs is read: how to turn string bytes into
//! character codes, how to map a code to Unicode, and how wide each glyph is.

use crate::document::PdfDocument;
use crate::fonts::cmap::{parse_tounicode_cmap, CMap};
use crate::fonts::encoding::{parse_differences, winansi_char};
use crate::object::{Dict, Object};
use std::collections::HashMap;

/// Glyph width used when a font declares none, in thousandths of an em.
pub const FALLBACK_GLYPH_WIDTH: f32 = 500.0;

/// Font information extracted from a PDF font dictionary.
#[derive(Debug, Clone)]
pub struct FontInfo {
    /// Base font name (e.g. "Helvetica-Bold")
    pub base_font: String,
    /// Font subtype (e.g. "Type1", "TrueType", "Type0")
    pub subtype: String,
    /// ToUnicode CMap, when present
    pub to_unicode: Option<CMap>,
    /// `/Differences` overrides of the base encoding
    pub differences: HashMap<u8, char>,
    /// Simple font widths indexed by `code - first_char`
    pub widths: Vec<f32>,
    /// First code covered by `widths`
    pub first_char: u32,
    /// CID font widths from `/W`
    pub cid_widths: HashMap<u32, f32>,
    /// Width for codes not covered by the tables
    pub default_width: f32,
}

impl Default for FontInfo {
    fn default() -> Self {
        Self {
            base_font: String::new(),
            subtype: String::new(),
            to_unicode: None,
            differences: HashMap::new(),
            widths: Vec::new(),
            first_char: 0,
            cid_widths: HashMap::new(),
            default_width: FALLBACK_GLYPH_WIDTH,
        }
    }
}

impl FontInfo {
    /// Read a font dictionary, resolving indirect entries through `doc`.
    ///
    /// Never fails: missing entries fall back to WinAnsi decoding and
    /// half-em glyph widths.
    pub fn from_dict(font: &Dict, doc: &PdfDocument) -> Self {
        let name_of = |key: &str| {
            font.get(key)
                .and_then(|o| doc.resolve(o))
                .and_then(Object::as_name)
                .unwrap_or("Unknown")
                .to_string()
        };
        let base_font = name_of("BaseFont");
        let subtype = name_of("Subtype");

        let to_unicode = font
            .get("ToUnicode")
            .and_then(|o| doc.resolve(o))
            .and_then(|stream| match stream.decode_stream_data() {
                Ok(data) => Some(parse_tounicode_cmap(&data)),
                Err(e) => {
                    log::warn!("ToUnicode CMap of '{}' unreadable: {}", base_font, e);
                    None
                },
            });

        let mut info = FontInfo {
            base_font,
            subtype,
            to_unicode,
            ..Default::default()
        };

        if info.is_composite() {
            info.read_cid_widths(font, doc);
        } else {
            info.read_simple_widths(font, doc);
            if let Some(enc) = font.get("Encoding").and_then(|o| doc.resolve_dict(o)) {
                if let Some(diffs) = enc.get("Differences").and_then(|d| doc.resolve(d)) {
                    info.differences = parse_differences(diffs.as_array().map(Vec::as_slice).unwrap_or(&[]));
                }
            }
        }

        log::trace!(
            "font '{}' ({}): tounicode={} widths={} cid_widths={}",
            info.base_font,
            info.subtype,
            info.to_unicode.is_some(),
            info.widths.len(),
            info.cid_widths.len()
        );
        info
    }

    fn read_simple_widths(&mut self, font: &Dict, doc: &PdfDocument) {
        self.first_char = font
            .get("FirstChar")
            .and_then(|o| doc.resolve(o))
            .and_then(Object::as_integer)
            .and_then(|n| u32::try_from(n).ok())
            .unwrap_or(0);
        if let Some(widths) = font
            .get("Widths")
            .and_then(|o| doc.resolve(o))
            .and_then(Object::as_array)
        {
            self.widths = widths
                .iter()
                .map(|w| {
                    doc.resolve(w)
                        .and_then(Object::as_number)
                        .unwrap_or(0.0) as f32
                })
                .collect();
        }
    }

    /// `/W` lives on the descendant CIDFont and has two shapes:
    /// `c [w1 w2 ...]` and `c_first c_last w`.
    fn read_cid_widths(&mut self, font: &Dict, doc: &PdfDocument) {
        let Some(descendant) = font
            .get("DescendantFonts")
            .and_then(|o| doc.resolve(o))
            .and_then(Object::as_array)
            .and_then(|a| a.first())
            .and_then(|o| doc.resolve_dict(o))
        else {
            return;
        };

        if let Some(dw) = descendant
            .get("DW")
            .and_then(|o| doc.resolve(o))
            .and_then(Object::as_number)
        {
            self.default_width = dw as f32;
        }

        let Some(w) = descendant
            .get("W")
            .and_then(|o| doc.resolve(o))
            .and_then(Object::as_array)
        else {
            return;
        };

        let mut i = 0;
        while i < w.len() {
            let Some(start) = w[i].as_integer().and_then(|n| u32::try_from(n).ok()) else {
                break;
            };
            match w.get(i + 1).and_then(|o| doc.resolve(o)) {
                Some(Object::Array(list)) => {
                    for (offset, width) in list.iter().enumerate() {
                        if let Some(width) = width.as_number() {
                            self.cid_widths.insert(start + offset as u32, width as f32);
                        }
                    }
                    i += 2;
                },
                Some(end) => {
                    let end = end.as_integer().and_then(|n| u32::try_from(n).ok());
                    let width = w.get(i + 2).and_then(Object::as_number);
                    if let (Some(end), Some(width)) = (end, width) {
                        for code in start..=end.min(start.saturating_add(0xFFFF)) {
                            self.cid_widths.insert(code, width as f32);
                        }
                    }
                    i += 3;
                },
                None => break,
            }
        }
    }

    /// Type0 fonts use two-byte codes.
    pub fn is_composite(&self) -> bool {
        self.subtype == "Type0"
    }

    /// Split string bytes into character codes.
    pub fn char_codes(&self, bytes: &[u8]) -> Vec<u32> {
        if self.is_composite() {
            bytes
                .chunks(2)
                .map(|pair| match pair {
                    [hi, lo] => (*hi as u32) << 8 | *lo as u32,
                    [single] => *single as u32,
                    _ => 0,
                })
                .collect()
        } else {
            bytes.iter().map(|&b| b as u32).collect()
        }
    }

    /// Unicode text for one character code.
    ///
    /// ToUnicode wins; simple fonts then use `/Differences` and WinAnsi.
    /// Unmappable codes yield an empty string.
    pub fn decode_char(&self, code: u32) -> String {
        if let Some(s) = self.to_unicode.as_ref().and_then(|m| m.get(&code)) {
            if s != "\u{FFFD}" {
                return s.clone();
            }
        }
        if self.is_composite() {
            return String::new();
        }
        let Ok(byte) = u8::try_from(code) else {
            return String::new();
        };
        self.differences
            .get(&byte)
            .copied()
            .or_else(|| winansi_char(byte))
            .map(String::from)
            .unwrap_or_default()
    }

    /// Glyph width in thousandths of an em.
    pub fn glyph_width(&self, code: u32) -> f32 {
        if self.is_composite() {
            return self.cid_widths.get(&code).copied().unwrap_or(self.default_width);
        }
        code.checked_sub(self.first_char)
            .and_then(|idx| self.widths.get(idx as usize))
            .copied()
            .filter(|w| *w > 0.0)
            .unwrap_or(self.default_width)
    }
}
