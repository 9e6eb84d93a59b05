//! Content stream parser.
//!
//! Content streams are postfix: operands come first, then the operator name.
//!
//! ```text
//! BT
//!   /F1 8 Tf
//!   42.5 700 Td
//!   (Smith, Mike) Tj
//! ET
//! ```
//!
//! Unparseable bytes are skipped one at a time so a single corrupt operand
//! does not lose the rest of the page.

use crate::content::operators::{Operator, TextElement};
use crate::lexer::{is_pdf_delimiter, is_pdf_whitespace, skip_ws};
use crate::object::Object;
use crate::parser::{find_keyword, parse_object};

/// Parse a decoded content stream into operators.
///
/// ```
/// use statsheet::content::{parse_content_stream, Operator};
///
/// let ops = parse_content_stream(b"BT /F1 12 Tf 100 700 Td (Hello) Tj ET");
/// assert_eq!(ops.first(), Some(&Operator::BeginText));
/// assert_eq!(ops.len(), 5);
/// ```
pub fn parse_content_stream(data: &[u8]) -> Vec<Operator> {
    let mut operators = Vec::new();
    let mut operands: Vec<Object> = Vec::new();
    let mut input = data;

    loop {
        input = match skip_ws(input) {
            Ok((rest, _)) => rest,
            Err(_) => input,
        };
        let Some(&first) = input.first() else {
            break;
        };

        if is_operator_start(first) {
            let len = input
                .iter()
                .position(|&c| is_pdf_whitespace(c) || is_pdf_delimiter(c))
                .unwrap_or(input.len());
            let name = String::from_utf8_lossy(&input[..len]).into_owned();
            input = &input[len..];

            match name.as_str() {
                "true" => operands.push(Object::Boolean(true)),
                "false" => operands.push(Object::Boolean(false)),
                "null" => operands.push(Object::Null),
                "BI" => {
                    input = skip_inline_image(input);
                    operands.clear();
                },
                _ => operators.push(build_operator(&name, std::mem::take(&mut operands))),
            }
            continue;
        }

        match parse_object(input) {
            Ok((rest, obj)) => {
                operands.push(obj);
                input = rest;
            },
            Err(_) => {
                log::trace!("skipping unparseable content byte 0x{:02X}", first);
                operands.clear();
                input = &input[1..];
            },
        }
    }

    operators
}

fn is_operator_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'\'' || byte == b'"' || byte == b'*'
}

/// Skip `... ID <binary> EI`. The binary payload can contain anything, so
/// the scan looks for `EI` delimited by whitespace.
fn skip_inline_image(input: &[u8]) -> &[u8] {
    let Some(id_pos) = find_keyword(input, b"ID") else {
        return &[];
    };
    let mut pos = id_pos + 2;
    while pos + 2 <= input.len() {
        if &input[pos..pos + 2] == b"EI"
            && input.get(pos.wrapping_sub(1)).map_or(true, |&c| is_pdf_whitespace(c))
            && input.get(pos + 2).map_or(true, |&c| is_pdf_whitespace(c))
        {
            return &input[pos + 2..];
        }
        pos += 1;
    }
    &[]
}

fn number(operands: &[Object], idx: usize, default: f32) -> f32 {
    operands
        .get(idx)
        .and_then(|o| o.as_number())
        .map(|n| n as f32)
        .unwrap_or(default)
}

fn string(operands: &[Object], idx: usize) -> Vec<u8> {
    operands
        .get(idx)
        .and_then(|o| o.as_string())
        .map(<[u8]>::to_vec)
        .unwrap_or_default()
}

fn matrix(operands: &[Object]) -> [f32; 6] {
    [
        number(operands, 0, 1.0),
        number(operands, 1, 0.0),
        number(operands, 2, 0.0),
        number(operands, 3, 1.0),
        number(operands, 4, 0.0),
        number(operands, 5, 0.0),
    ]
}

fn build_operator(name: &str, operands: Vec<Object>) -> Operator {
    match name {
        "BT" => Operator::BeginText,
        "ET" => Operator::EndText,
        "Td" => Operator::Td {
            tx: number(&operands, 0, 0.0),
            ty: number(&operands, 1, 0.0),
        },
        "TD" => Operator::TD {
            tx: number(&operands, 0, 0.0),
            ty: number(&operands, 1, 0.0),
        },
        "Tm" => Operator::Tm { m: matrix(&operands) },
        "T*" => Operator::TStar,
        "Tj" => Operator::Tj {
            text: string(&operands, 0),
        },
        "TJ" => {
            let array = operands
                .first()
                .and_then(|o| o.as_array())
                .map(|items| {
                    items
                        .iter()
                        .filter_map(|item| match item {
                            Object::String(s) => Some(TextElement::String(s.clone())),
                            other => other.as_number().map(|n| TextElement::Offset(n as f32)),
                        })
                        .collect()
                })
                .unwrap_or_default();
            Operator::TJ { array }
        },
        "'" => Operator::Quote {
            text: string(&operands, 0),
        },
        "\"" => Operator::DoubleQuote {
            word_space: number(&operands, 0, 0.0),
            char_space: number(&operands, 1, 0.0),
            text: string(&operands, 2),
        },
        "Tc" => Operator::Tc {
            char_space: number(&operands, 0, 0.0),
        },
        "Tw" => Operator::Tw {
            word_space: number(&operands, 0, 0.0),
        },
        "Tz" => Operator::Tz {
            scale: number(&operands, 0, 100.0),
        },
        "TL" => Operator::TL {
            leading: number(&operands, 0, 0.0),
        },
        "Tf" => Operator::Tf {
            font: operands
                .first()
                .and_then(|o| o.as_name())
                .unwrap_or_default()
                .to_string(),
            size: number(&operands, 1, 12.0),
        },
        "Ts" => Operator::Ts {
            rise: number(&operands, 0, 0.0),
        },
        "q" => Operator::SaveState,
        "Q" => Operator::RestoreState,
        "cm" => Operator::Cm { m: matrix(&operands) },
        "Do" => Operator::Do {
            name: operands
                .first()
                .and_then(|o| o.as_name())
                .unwrap_or_default()
                .to_string(),
        },
        other => Operator::Other {
            name: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_positioning() {
        let ops = parse_content_stream(b"BT 1 0 0 1 72 700 Tm 0 -12 TD T* ET");
        assert_eq!(
            ops[1],
            Operator::Tm {
                m: [1.0, 0.0, 0.0, 1.0, 72.0, 700.0]
            }
        );
        assert_eq!(ops[2], Operator::TD { tx: 0.0, ty: -12.0 });
        assert_eq!(ops[3], Operator::TStar);
    }

    #[test]
    fn test_tj_array() {
        let ops = parse_content_stream(b"[(1)-250(23)] TJ");
        assert_eq!(
            ops[0],
            Operator::TJ {
                array: vec![
                    TextElement::String(b"1".to_vec()),
                    TextElement::Offset(-250.0),
                    TextElement::String(b"23".to_vec()),
                ]
            }
        );
    }

    #[test]
    fn test_quote_operators() {
        let ops = parse_content_stream(b"(a) ' 1 2 (b) \"");
        assert_eq!(ops[0], Operator::Quote { text: b"a".to_vec() });
        assert_eq!(
            ops[1],
            Operator::DoubleQuote {
                word_space: 1.0,
                char_space: 2.0,
                text: b"b".to_vec()
            }
        );
    }

    #[test]
    fn test_graphics_operators_collapse() {
        let ops = parse_content_stream(b"q 0.5 g 0 0 10 10 re f Q /Fm0 Do");
        assert_eq!(ops[0], Operator::SaveState);
        assert!(matches!(&ops[1], Operator::Other { name } if name == "g"));
        assert_eq!(ops.last(), Some(&Operator::Do { name: "Fm0".to_string() }));
    }

    #[test]
    fn test_inline_image_skipped() {
        let ops = parse_content_stream(b"BI /W 2 /H 1 ID \x00\xFFEI\x01 EI BT ET");
        assert_eq!(ops, vec![Operator::BeginText, Operator::EndText]);
    }

    #[test]
    fn test_garbage_is_skipped() {
        let ops = parse_content_stream(b") BT (x) Tj ET");
        assert_eq!(ops.len(), 3);
        assert_eq!(ops[1], Operator::Tj { text: b"x".to_vec() });
    }
}
