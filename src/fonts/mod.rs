//! Font handling for text extraction: ToUnicode CMaps, single-byte
//! encodings and glyph widths.

pub mod cmap;
pub mod encoding;
pub mod font_dict;

pub use cmap::{parse_tounicode_cmap, CMap};
pub use font_dict::{FontInfo, FALLBACK_GLYPH_WIDTH};
