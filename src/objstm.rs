//! Object stream parsing (PDF 1.5+).
//!
//! An object stream (`/Type /ObjStm`) packs several objects into one
//! compressed stream:
//!
//! ```text
//! << /Type /ObjStm /N 3 /First 15 /Filter /FlateDecode >>
//! stream
//! 10 0 11 24 12 51     % (object number, offset from /First) pairs
//! << /Type /Page ... >> [ ... ] ...
//! endstream
//! ```

use crate::error::{Error, Result};
use crate::lexer::{token, Token};
use crate::object::Object;
use crate::parser::parse_object;

/// Upper bound on `/N`, rejecting absurd headers before allocating.
const MAX_OBJECTS_PER_STREAM: i64 = 100_000;

/// Decode an object stream and parse every object it contains.
///
/// Objects that fail to parse are skipped; the rest are returned in header
/// order as `(object number, object)` pairs.
///
/// # Errors
///
/// Fails when `stream_obj` is not a stream, when `/N` or `/First` is missing
/// or out of range, or when the stream cannot be decoded.
pub fn parse_object_stream(stream_obj: &Object) -> Result<Vec<(u32, Object)>> {
    let dict = stream_obj
        .as_dict()
        .ok_or_else(|| Error::InvalidPdf("object stream is not a stream".to_string()))?;

    let n = dict
        .get("N")
        .and_then(|o| o.as_integer())
        .filter(|n| (0..=MAX_OBJECTS_PER_STREAM).contains(n))
        .ok_or_else(|| Error::InvalidPdf("object stream /N missing or invalid".to_string()))?
        as usize;
    let first = dict
        .get("First")
        .and_then(|o| o.as_integer())
        .filter(|f| *f >= 0)
        .ok_or_else(|| Error::InvalidPdf("object stream /First missing or invalid".to_string()))?
        as usize;

    let data = stream_obj.decode_stream_data()?;
    if first > data.len() {
        return Err(Error::InvalidPdf(format!(
            "object stream /First {} beyond data length {}",
            first,
            data.len()
        )));
    }

    let pairs = read_header_pairs(&data[..first], n);
    if pairs.len() < n {
        log::warn!("object stream header lists {} of {} objects", pairs.len(), n);
    }

    let body = &data[first..];
    let mut objects = Vec::with_capacity(pairs.len());
    for (obj_num, offset) in pairs {
        let Some(input) = body.get(offset..) else {
            log::warn!("object {} offset {} outside object stream", obj_num, offset);
            continue;
        };
        match parse_object(input) {
            Ok((_, obj)) => objects.push((obj_num, obj)),
            Err(e) => log::warn!("object {} in object stream failed to parse: {:?}", obj_num, e),
        }
    }

    Ok(objects)
}

fn read_header_pairs(mut header: &[u8], n: usize) -> Vec<(u32, usize)> {
    let mut pairs = Vec::with_capacity(n);
    while pairs.len() < n {
        let Ok((rest, Token::Integer(obj_num))) = token(header) else {
            break;
        };
        let Ok((rest, Token::Integer(offset))) = token(rest) else {
            break;
        };
        header = rest;
        if let (Ok(obj_num), Ok(offset)) = (u32::try_from(obj_num), usize::try_from(offset)) {
            pairs.push((obj_num, offset));
        }
    }
    pairs
}
