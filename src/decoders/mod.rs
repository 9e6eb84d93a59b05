//! Stream filters needed to read stat sheet content streams.
//!
//! Stat sheet exports compress page content with FlateDecode and, rarely,
//! wrap it in ASCIIHexDecode. Image filters never carry text and are not
//! decoded; any other filter makes the stream unreadable and the caller
//! skips it.

use crate::error::{Error, Result};
use crate::object::{Dict, Object};

mod flate;

pub use flate::FlateDecoder;

/// Decompressed streams larger than this are rejected.
const MAX_DECOMPRESSED_SIZE: usize = 64 * 1024 * 1024;

/// Trait for PDF stream decoders.
pub trait StreamDecoder {
    /// Decode the input data.
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>>;

    /// Filter name as it appears in `/Filter`.
    fn name(&self) -> &str;
}

/// ASCIIHexDecode filter; the terminating `>` is optional.
pub struct AsciiHexDecoder;

impl StreamDecoder for AsciiHexDecoder {
    fn decode(&self, input: &[u8]) -> Result<Vec<u8>> {
        let body = match input.iter().position(|&c| c == b'>') {
            Some(end) => &input[..end],
            None => input,
        };
        crate::parser::decode_hex(body).map_err(|e| Error::Decode(format!("ASCIIHexDecode: {}", e)))
    }

    fn name(&self) -> &str {
        "ASCIIHexDecode"
    }
}

/// Filter names from a `/Filter` entry, which may be a name or an array.
pub fn filter_names(filter: Option<&Object>) -> Vec<String> {
    match filter {
        Some(Object::Name(n)) => vec![n.clone()],
        Some(Object::Array(items)) => items
            .iter()
            .filter_map(|o| o.as_name().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

fn decoder_for(name: &str) -> Option<Box<dyn StreamDecoder>> {
    match name {
        "FlateDecode" | "Fl" => Some(Box::new(FlateDecoder)),
        "ASCIIHexDecode" | "AHx" => Some(Box::new(AsciiHexDecoder)),
        _ => None,
    }
}

/// Decode stream data through every filter listed in `dict`, in order.
pub fn decode_stream(dict: &Dict, data: &[u8]) -> Result<Vec<u8>> {
    let filters = filter_names(dict.get("Filter"));
    let predictor = dict
        .get("DecodeParms")
        .and_then(|p| p.as_dict())
        .and_then(|p| p.get("Predictor"))
        .and_then(|p| p.as_integer())
        .unwrap_or(1);
    if predictor > 1 {
        return Err(Error::Decode(format!("predictor {} not supported", predictor)));
    }

    let mut current = data.to_vec();
    for name in &filters {
        let decoder = decoder_for(name).ok_or_else(|| Error::UnsupportedFilter(name.clone()))?;
        current = decoder.decode(&current)?;
        if current.len() > MAX_DECOMPRESSED_SIZE {
            return Err(Error::Decode(format!(
                "{} output of {} bytes exceeds limit",
                decoder.name(),
                current.len()
            )));
        }
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_with_filter(filter: Object) -> Dict {
        let mut dict = Dict::new();
        dict.insert("Filter".to_string(), filter);
        dict
    }

    #[test]
    fn test_no_filters_is_identity() {
        assert_eq!(decode_stream(&Dict::new(), b"BT ET").unwrap(), b"BT ET");
    }

    #[test]
    fn test_ascii_hex_filter() {
        let dict = dict_with_filter(Object::Name("ASCIIHexDecode".to_string()));
        assert_eq!(decode_stream(&dict, b"48 65 6C 6C 6F>").unwrap(), b"Hello");
    }

    #[test]
    fn test_unsupported_filter() {
        let dict = dict_with_filter(Object::Name("DCTDecode".to_string()));
        match decode_stream(&dict, b"..") {
            Err(Error::UnsupportedFilter(name)) => assert_eq!(name, "DCTDecode"),
            other => panic!("expected UnsupportedFilter, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_array() {
        let names = filter_names(Some(&Object::Array(vec![
            Object::Name("ASCIIHexDecode".to_string()),
            Object::Name("FlateDecode".to_string()),
        ])));
        assert_eq!(names, vec!["ASCIIHexDecode", "FlateDecode"]);
    }
}
