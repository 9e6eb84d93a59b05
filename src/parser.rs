//! PDF object parser.
//!
//! Recursive descent over lexer tokens: primitives map directly, arrays and
//! dictionaries recurse, `N G R` becomes a reference and a dictionary
//! followed by `stream` becomes a stream object. Truncated arrays and
//! dictionaries at end of input are returned as far as they got, which is
//! what damaged stat sheet exports usually need.

use crate::error::{Error, Result};
use crate::lexer::{hex_value, token, Token};
use crate::object::{Dict, Object, ObjectRef};
use nom::IResult;

fn nom_fail(input: &[u8]) -> nom::Err<nom::error::Error<&[u8]>> {
    nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Tag))
}

/// Decode escape sequences in a literal string body.
///
/// Handles `\n \r \t \b \f \( \) \\`, octal `\ddd`, and line continuations.
/// Unknown escapes drop the backslash.
///
/// ```
/// # use statsheet::parser::decode_literal_string_escapes;
/// assert_eq!(decode_literal_string_escapes(b"a\\(b\\)"), b"a(b)");
/// assert_eq!(decode_literal_string_escapes(b"\\247"), b"\xa7");
/// ```
pub fn decode_literal_string_escapes(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let c = raw[i];
        if c != b'\\' || i + 1 >= raw.len() {
            out.push(c);
            i += 1;
            continue;
        }

        let next = raw[i + 1];
        i += 2;
        match next {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'\n' => {},
            b'\r' => {
                if raw.get(i) == Some(&b'\n') {
                    i += 1;
                }
            },
            b'0'..=b'7' => {
                let mut val = (next - b'0') as u32;
                let mut taken = 1;
                while taken < 3 {
                    match raw.get(i) {
                        Some(&d) if (b'0'..=b'7').contains(&d) => {
                            val = val * 8 + (d - b'0') as u32;
                            i += 1;
                            taken += 1;
                        },
                        _ => break,
                    }
                }
                out.push((val & 0xFF) as u8);
            },
            other => out.push(other),
        }
    }

    out
}

/// Decode a hex string body. Whitespace is ignored; an odd trailing digit is
/// padded with 0.
///
/// ```
/// # use statsheet::parser::decode_hex;
/// assert_eq!(decode_hex(b"48 65 6C 6C 6F").unwrap(), b"Hello");
/// assert_eq!(decode_hex(b"7").unwrap(), vec![0x70]);
/// ```
pub fn decode_hex(hex_bytes: &[u8]) -> Result<Vec<u8>> {
    let digits: Vec<u8> = hex_bytes
        .iter()
        .copied()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    if let Some(bad) = digits.iter().find(|c| !c.is_ascii_hexdigit()) {
        return Err(Error::ParseError {
            offset: 0,
            reason: format!("invalid hex digit 0x{:02X}", bad),
        });
    }

    Ok(digits
        .chunks(2)
        .map(|pair| {
            let hi = hex_value(pair[0]);
            let lo = pair.get(1).map(|&c| hex_value(c)).unwrap_or(0);
            hi << 4 | lo
        })
        .collect())
}

/// Parse one PDF object.
///
/// ```
/// use statsheet::parser::parse_object;
///
/// let (_, obj) = parse_object(b"<< /Type /Page /Parent 2 0 R >>").unwrap();
/// assert_eq!(obj.dict_type(), Some("Page"));
/// ```
pub fn parse_object(input: &[u8]) -> IResult<&[u8], Object> {
    let (rest, tok) = token(input)?;

    match tok {
        Token::Null => Ok((rest, Object::Null)),
        Token::True => Ok((rest, Object::Boolean(true))),
        Token::False => Ok((rest, Object::Boolean(false))),
        Token::Real(r) => Ok((rest, Object::Real(r))),
        Token::Name(name) => Ok((rest, Object::Name(name))),
        Token::LiteralString(raw) => Ok((rest, Object::String(decode_literal_string_escapes(raw)))),
        Token::HexString(raw) => match decode_hex(raw) {
            Ok(bytes) => Ok((rest, Object::String(bytes))),
            Err(_) => Err(nom::Err::Failure(nom::error::Error::new(
                rest,
                nom::error::ErrorKind::HexDigit,
            ))),
        },
        Token::Integer(i) => {
            if let Ok((after_gen, Token::Integer(gen))) = token(rest) {
                if let Ok((after_r, Token::R)) = token(after_gen) {
                    if i >= 0 && (0..=u16::MAX as i64).contains(&gen) {
                        return Ok((after_r, Object::Reference(ObjectRef::new(i as u32, gen as u16))));
                    }
                }
            }
            Ok((rest, Object::Integer(i)))
        },
        Token::ArrayStart => parse_array(rest),
        Token::DictStart => {
            let (after_dict, dict) = parse_dictionary(rest)?;
            if let Ok((stream_input, Token::StreamStart)) = token(after_dict) {
                let (after_stream, data) = parse_stream_data(stream_input, &dict)?;
                return Ok((
                    after_stream,
                    Object::Stream {
                        dict,
                        data: bytes::Bytes::from(data),
                    },
                ));
            }
            Ok((after_dict, Object::Dictionary(dict)))
        },
        _ => Err(nom_fail(input)),
    }
}

fn parse_array(input: &[u8]) -> IResult<&[u8], Object> {
    let mut items = Vec::new();
    let mut remaining = input;

    loop {
        match token(remaining) {
            Ok((rest, Token::ArrayEnd)) => return Ok((rest, Object::Array(items))),
            Ok(_) => {
                let (rest, obj) = parse_object(remaining)?;
                items.push(obj);
                remaining = rest;
            },
            Err(_) if remaining.iter().all(|c| c.is_ascii_whitespace()) => {
                return Ok((remaining, Object::Array(items)));
            },
            Err(e) => return Err(e),
        }
    }
}

fn parse_dictionary(input: &[u8]) -> IResult<&[u8], Dict> {
    let mut dict = Dict::new();
    let mut remaining = input;

    loop {
        match token(remaining) {
            Ok((rest, Token::DictEnd)) => return Ok((rest, dict)),
            Ok((rest, Token::Name(key))) => {
                let (rest, value) = parse_object(rest)?;
                dict.insert(key, value);
                remaining = rest;
            },
            Ok(_) => return Err(nom_fail(remaining)),
            Err(_) if remaining.iter().all(|c| c.is_ascii_whitespace()) => {
                return Ok((remaining, dict));
            },
            Err(e) => return Err(e),
        }
    }
}

/// Read stream bytes after the `stream` keyword.
///
/// A direct `/Length` is trusted when `endstream` follows it; an indirect or
/// wrong length falls back to scanning for `endstream`.
fn parse_stream_data<'a>(input: &'a [u8], dict: &Dict) -> IResult<&'a [u8], Vec<u8>> {
    let body = if let Some(rest) = input.strip_prefix(b"\r\n") {
        rest
    } else if let Some(rest) = input.strip_prefix(b"\n").or_else(|| input.strip_prefix(b"\r")) {
        rest
    } else {
        input
    };

    if let Some(len) = dict.get("Length").and_then(|l| l.as_integer()) {
        let len = len.max(0) as usize;
        if len <= body.len() {
            if let Ok((after, Token::StreamEnd)) = token(&body[len..]) {
                return Ok((after, body[..len].to_vec()));
            }
        }
        log::debug!("stream /Length {} does not land on endstream, scanning", len);
    }

    match find_keyword(body, b"endstream") {
        Some(pos) => {
            let mut data = &body[..pos];
            while let Some(stripped) = data
                .strip_suffix(b"\n")
                .or_else(|| data.strip_suffix(b"\r"))
            {
                data = stripped;
            }
            Ok((&body[pos + b"endstream".len()..], data.to_vec()))
        },
        None => Err(nom::Err::Error(nom::error::Error::new(body, nom::error::ErrorKind::Eof))),
    }
}

/// Position of the first occurrence of `keyword` in `input`.
pub(crate) fn find_keyword(input: &[u8], keyword: &[u8]) -> Option<usize> {
    input.windows(keyword.len()).position(|w| w == keyword)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives() {
        assert_eq!(parse_object(b"null").unwrap().1, Object::Null);
        assert_eq!(parse_object(b"true").unwrap().1, Object::Boolean(true));
        assert_eq!(parse_object(b"12").unwrap().1, Object::Integer(12));
        assert_eq!(parse_object(b"(a\\)b)").unwrap().1, Object::String(b"a)b".to_vec()));
        assert_eq!(parse_object(b"<4142>").unwrap().1, Object::String(b"AB".to_vec()));
    }

    #[test]
    fn test_parse_reference_vs_integers() {
        assert_eq!(
            parse_object(b"10 0 R").unwrap().1,
            Object::Reference(ObjectRef::new(10, 0))
        );
        let (rest, obj) = parse_object(b"10 0 12").unwrap();
        assert_eq!(obj, Object::Integer(10));
        assert_eq!(rest, b" 0 12");
    }

    #[test]
    fn test_parse_nested_array() {
        let (_, obj) = parse_object(b"[1 [2 3] /N (s)]").unwrap();
        let arr = obj.as_array().unwrap();
        assert_eq!(arr.len(), 4);
        assert_eq!(arr[1].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_parse_dictionary() {
        let (_, obj) = parse_object(b"<< /Type /Font /Widths [500 600] /FirstChar 32 >>").unwrap();
        let dict = obj.as_dict().unwrap();
        assert_eq!(dict.get("FirstChar"), Some(&Object::Integer(32)));
        assert_eq!(dict.get("Widths").and_then(|w| w.as_array()).map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_parse_stream_with_length() {
        let input = b"<< /Length 5 >>\nstream\nHello\nendstream";
        let (_, obj) = parse_object(input).unwrap();
        match obj {
            Object::Stream { data, .. } => assert_eq!(&data[..], b"Hello"),
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_stream_with_wrong_length_scans() {
        let input = b"<< /Length 99 >>\nstream\nBT ET\nendstream";
        let (_, obj) = parse_object(input).unwrap();
        match obj {
            Object::Stream { data, .. } => assert_eq!(&data[..], b"BT ET"),
            other => panic!("expected stream, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_dictionary_is_returned() {
        let (_, obj) = parse_object(b"<< /Type /Page ").unwrap();
        assert_eq!(obj.dict_type(), Some("Page"));
    }

    #[test]
    fn test_decode_hex_rejects_garbage() {
        assert!(decode_hex(b"4G").is_err());
    }
}
