//! PDF lexer (tokenizer).
//!
//! Splits PDF bytes into the atomic tokens the object parser and the content
//! stream parser build on: numbers, literal and hex strings, names, keywords
//! and delimiters. Whitespace (space, \t, \r, \n, \0, \f) and comments
//! (`%` to end of line) are skipped before every token.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till, take_while},
    character::complete::{char, digit1, one_of},
    combinator::{map, opt, value},
    sequence::{delimited, preceded},
    IResult,
};

/// Token types recognized by the lexer.
#[derive(Debug, PartialEq, Clone)]
pub enum Token<'a> {
    /// Integer number (42, -123)
    Integer(i64),
    /// Real number (3.14, -.5, 5.)
    Real(f64),
    /// Raw literal string bytes, escapes still encoded
    LiteralString(&'a [u8]),
    /// Raw hex string digits, whitespace preserved
    HexString(&'a [u8]),
    /// Name with `#XX` escapes decoded
    Name(String),
    /// `true`
    True,
    /// `false`
    False,
    /// `null`
    Null,
    /// `[`
    ArrayStart,
    /// `]`
    ArrayEnd,
    /// `<<`
    DictStart,
    /// `>>`
    DictEnd,
    /// `obj`
    ObjStart,
    /// `endobj`
    ObjEnd,
    /// `stream`
    StreamStart,
    /// `endstream`
    StreamEnd,
    /// `R` in `10 0 R`
    R,
}

fn nom_fail(input: &[u8], kind: nom::error::ErrorKind) -> nom::Err<nom::error::Error<&[u8]>> {
    nom::Err::Error(nom::error::Error::new(input, kind))
}

/// Returns true for PDF whitespace bytes.
pub fn is_pdf_whitespace(c: u8) -> bool {
    matches!(c, b' ' | b'\t' | b'\r' | b'\n' | 0x00 | 0x0C)
}

/// Returns true for PDF delimiter bytes.
pub fn is_pdf_delimiter(c: u8) -> bool {
    matches!(c, b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%')
}

fn comment(input: &[u8]) -> IResult<&[u8], ()> {
    value((), preceded(char('%'), take_till(|c| c == b'\r' || c == b'\n')))(input)
}

/// Skip any run of whitespace and comments. Never fails.
pub fn skip_ws(input: &[u8]) -> IResult<&[u8], ()> {
    let mut remaining = input;
    loop {
        let (rest, _) = take_while(is_pdf_whitespace)(remaining)?;
        remaining = rest;
        match comment(remaining) {
            Ok((rest, _)) => remaining = rest,
            Err(_) => return Ok((remaining, ())),
        }
    }
}

fn parse_number(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let start = input;
    let (input, sign) = opt(one_of("+-"))(input)?;
    let (input, int_part) = opt(digit1)(input)?;
    let (input, frac_part) = opt(preceded(char('.'), opt(digit1)))(input)?;

    if int_part.is_none() && frac_part.is_none() {
        return Err(nom_fail(start, nom::error::ErrorKind::Digit));
    }

    let negative = sign == Some('-');
    let int_str = int_part
        .map(|d| String::from_utf8_lossy(d).into_owned())
        .unwrap_or_default();

    match frac_part {
        Some(frac) => {
            let frac_str = frac
                .map(|d| String::from_utf8_lossy(d).into_owned())
                .unwrap_or_default();
            let text = format!(
                "{}.{}",
                if int_str.is_empty() { "0" } else { &int_str },
                if frac_str.is_empty() { "0" } else { &frac_str }
            );
            let num: f64 = text
                .parse()
                .map_err(|_| nom_fail(start, nom::error::ErrorKind::Float))?;
            Ok((input, Token::Real(if negative { -num } else { num })))
        },
        None => {
            // Overlong integers show up in damaged files; degrade to a real.
            match int_str.parse::<i64>() {
                Ok(n) => Ok((input, Token::Integer(if negative { -n } else { n }))),
                Err(_) => {
                    let num: f64 = int_str
                        .parse()
                        .map_err(|_| nom_fail(start, nom::error::ErrorKind::Digit))?;
                    Ok((input, Token::Real(if negative { -num } else { num })))
                },
            }
        },
    }
}

/// Literal strings may nest balanced parentheses and escape either kind.
fn parse_literal_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (body, _) = char('(')(input)?;
    let mut depth = 1usize;
    let mut pos = 0usize;

    while pos < body.len() {
        match body[pos] {
            b'\\' => pos += 2,
            b'(' => {
                depth += 1;
                pos += 1;
            },
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&body[pos + 1..], Token::LiteralString(&body[..pos])));
                }
                pos += 1;
            },
            _ => pos += 1,
        }
    }

    Err(nom_fail(input, nom::error::ErrorKind::Char))
}

fn parse_hex_string(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    if input.starts_with(b"<<") {
        return Err(nom_fail(input, nom::error::ErrorKind::Tag));
    }
    delimited(
        char('<'),
        map(
            take_while(|c: u8| c.is_ascii_hexdigit() || is_pdf_whitespace(c)),
            Token::HexString,
        ),
        char('>'),
    )(input)
}

/// Decode `#XX` escapes in a name. Malformed escapes are kept literally.
///
/// ```
/// # use statsheet::lexer::decode_name_escapes;
/// assert_eq!(decode_name_escapes("A#20B"), "A B");
/// assert_eq!(decode_name_escapes("A#ZZ"), "A#ZZ");
/// ```
pub fn decode_name_escapes(name: &str) -> String {
    let bytes = name.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'#' && i + 2 < bytes.len() {
            let (hi, lo) = (bytes[i + 1], bytes[i + 2]);
            if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() {
                out.push(hex_value(hi) << 4 | hex_value(lo));
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Value of an ASCII hex digit; callers check `is_ascii_hexdigit` first.
pub(crate) fn hex_value(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

fn parse_name(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    preceded(
        char('/'),
        map(
            take_while(|c: u8| !is_pdf_whitespace(c) && !is_pdf_delimiter(c)),
            |bytes: &[u8]| Token::Name(decode_name_escapes(&String::from_utf8_lossy(bytes))),
        ),
    )(input)
}

/// Keywords must not run into a following regular character, otherwise
/// `nullx` or `Rect` would lex as a keyword plus junk.
fn keyword<'a>(word: &'static str, tok: Token<'static>) -> impl FnMut(&'a [u8]) -> IResult<&'a [u8], Token<'a>> {
    move |input: &'a [u8]| {
        let (rest, _) = tag(word)(input)?;
        match rest.first() {
            Some(&c) if !is_pdf_whitespace(c) && !is_pdf_delimiter(c) => {
                Err(nom_fail(input, nom::error::ErrorKind::Tag))
            },
            _ => Ok((rest, tok.clone())),
        }
    }
}

fn parse_keyword(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    alt((
        keyword("false", Token::False),
        keyword("true", Token::True),
        keyword("null", Token::Null),
        keyword("endobj", Token::ObjEnd),
        keyword("obj", Token::ObjStart),
        keyword("endstream", Token::StreamEnd),
        keyword("stream", Token::StreamStart),
        value(Token::DictStart, tag("<<")),
        value(Token::DictEnd, tag(">>")),
        value(Token::ArrayStart, tag("[")),
        value(Token::ArrayEnd, tag("]")),
        keyword("R", Token::R),
    ))(input)
}

/// Parse a single token after skipping whitespace and comments.
///
/// Keywords are tried before names and numbers; `<<` is tried before hex
/// strings so dictionaries never lex as strings.
pub fn token(input: &[u8]) -> IResult<&[u8], Token<'_>> {
    let (input, _) = skip_ws(input)?;
    alt((parse_keyword, parse_name, parse_number, parse_literal_string, parse_hex_string))(input)
}
