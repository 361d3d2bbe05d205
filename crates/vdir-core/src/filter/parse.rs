use super::{CompareOp, Filter, SimpleFilter, SubstringFilter, SubstringPart};
use crate::{stmt::Value, Error, Result};

use std::str::FromStr;

impl FromStr for Filter {
    type Err = Error;

    /// Parses an RFC 4515 filter string. A single item without the
    /// surrounding parentheses is accepted too.
    fn from_str(input: &str) -> Result<Filter> {
        let bytes = input.trim().as_bytes();
        let mut pos = 0;

        let filter = if bytes.first() == Some(&b'(') {
            parse_filter(bytes, &mut pos)?
        } else {
            parse_item(bytes, &mut pos, bytes.len())?
        };

        if pos != bytes.len() {
            return Err(Error::invalid_filter("unexpected trailing input", pos));
        }

        Ok(filter)
    }
}

fn parse_filter(input: &[u8], pos: &mut usize) -> Result<Filter> {
    expect(input, pos, b'(')?;

    let filter = match input.get(*pos) {
        Some(b'&') => {
            *pos += 1;
            Filter::And(parse_list(input, pos)?)
        }
        Some(b'|') => {
            *pos += 1;
            Filter::Or(parse_list(input, pos)?)
        }
        Some(b'!') => {
            *pos += 1;
            Filter::not(parse_filter(input, pos)?)
        }
        Some(_) => {
            let end = find_close(input, *pos)?;
            parse_item(input, pos, end)?
        }
        None => return Err(Error::invalid_filter("unexpected end of input", *pos)),
    };

    expect(input, pos, b')')?;
    Ok(filter)
}

fn parse_list(input: &[u8], pos: &mut usize) -> Result<Vec<Filter>> {
    let mut filters = vec![];
    while input.get(*pos) == Some(&b'(') {
        filters.push(parse_filter(input, pos)?);
    }

    if filters.is_empty() {
        return Err(Error::invalid_filter("empty filter list", *pos));
    }

    Ok(filters)
}

/// Parses `attr op value` spanning `input[*pos..end]`.
fn parse_item(input: &[u8], pos: &mut usize, end: usize) -> Result<Filter> {
    let start = *pos;
    while *pos < end && is_attribute_char(input[*pos]) {
        *pos += 1;
    }

    if *pos == start {
        return Err(Error::invalid_filter("expected attribute name", start));
    }

    let attribute = String::from_utf8_lossy(&input[start..*pos]).into_owned();

    let op = match (input.get(*pos), input.get(*pos + 1)) {
        (Some(b'='), _) => {
            *pos += 1;
            CompareOp::Eq
        }
        (Some(b'>'), Some(b'=')) => {
            *pos += 2;
            CompareOp::Ge
        }
        (Some(b'<'), Some(b'=')) => {
            *pos += 2;
            CompareOp::Le
        }
        (Some(b'~'), Some(b'=')) => {
            *pos += 2;
            CompareOp::Approx
        }
        _ => return Err(Error::invalid_filter("expected filter operator", *pos)),
    };

    let raw = &input[*pos..end];
    let value_pos = *pos;
    *pos = end;

    if op.is_eq() && raw == b"*" {
        return Ok(Filter::Present(attribute));
    }

    if op.is_eq() && raw.contains(&b'*') {
        let mut parts = vec![];
        for (i, chunk) in raw.split(|b| *b == b'*').enumerate() {
            if i > 0 {
                parts.push(SubstringPart::Any);
            }
            if !chunk.is_empty() {
                parts.push(SubstringPart::Text(unescape(chunk, value_pos)?));
            }
        }
        return Ok(SubstringFilter::new(attribute, parts).into());
    }

    let value = unescape(raw, value_pos)?;
    Ok(SimpleFilter::new(attribute, op, Value::String(value)).into())
}

/// Finds the `)` closing the item starting at `pos`.
fn find_close(input: &[u8], pos: usize) -> Result<usize> {
    input[pos..]
        .iter()
        .position(|b| *b == b')')
        .map(|offset| pos + offset)
        .ok_or_else(|| Error::invalid_filter("unterminated filter", pos))
}

fn unescape(raw: &[u8], offset: usize) -> Result<String> {
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        match raw[i] {
            b'\\' => {
                let hex = raw
                    .get(i + 1..i + 3)
                    .and_then(|hex| std::str::from_utf8(hex).ok())
                    .and_then(|hex| u8::from_str_radix(hex, 16).ok());

                match hex {
                    Some(byte) => {
                        bytes.push(byte);
                        i += 3;
                    }
                    // Lenient: `\x` for a non-hex `x` is the character itself
                    None => match raw.get(i + 1) {
                        Some(byte) => {
                            bytes.push(*byte);
                            i += 2;
                        }
                        None => {
                            return Err(Error::invalid_filter("dangling escape", offset + i))
                        }
                    },
                }
            }
            byte => {
                bytes.push(byte);
                i += 1;
            }
        }
    }

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn expect(input: &[u8], pos: &mut usize, byte: u8) -> Result<()> {
    if input.get(*pos) == Some(&byte) {
        *pos += 1;
        Ok(())
    } else {
        Err(Error::invalid_filter(
            format!("expected `{}`", byte as char),
            *pos,
        ))
    }
}

fn is_attribute_char(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'.' | b';' | b'_')
}
