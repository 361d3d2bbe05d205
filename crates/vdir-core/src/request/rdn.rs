use crate::{stmt::Value, Result};

use indexmap::IndexMap;
use std::fmt;

/// A relative distinguished name: one or more `attr=value` pairs joined by
/// `+`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Rdn {
    values: IndexMap<String, Value>,
}

impl Rdn {
    pub fn new() -> Rdn {
        Rdn::default()
    }

    /// Parses `uid=alice` or `cn=Alice+sn=Smith`. `\` escapes the next
    /// character.
    pub fn parse(rdn: &str) -> Result<Rdn> {
        let mut ret = Rdn::new();

        for pair in split_unescaped(rdn, '+') {
            let mut parts = split_unescaped(&pair, '=').into_iter();
            let (Some(name), Some(value), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(err!("invalid RDN `{rdn}`"));
            };

            let name = name.trim();
            if name.is_empty() {
                return Err(err!("invalid RDN `{rdn}`"));
            }

            ret.insert(name, Value::from(unescape(value.trim())));
        }

        if ret.is_empty() {
            return Err(err!("empty RDN"));
        }

        Ok(ret)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Display for Rdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = "";
        for (name, value) in &self.values {
            write!(f, "{s}{name}=")?;
            for ch in value.to_string().chars() {
                if matches!(ch, '+' | ',' | '=' | '\\') {
                    f.write_str("\\")?;
                }
                write!(f, "{ch}")?;
            }
            s = "+";
        }
        Ok(())
    }
}

/// Splits on `sep`, keeping escape sequences intact.
fn split_unescaped(input: &str, sep: char) -> Vec<String> {
    let mut parts = vec![];
    let mut current = String::new();
    let mut chars = input.chars();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            current.push(ch);
            if let Some(next) = chars.next() {
                current.push(next);
            }
        } else if ch == sep {
            parts.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }

    parts.push(current);
    parts
}

fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        match ch {
            '\\' => out.extend(chars.next()),
            ch => out.push(ch),
        }
    }
    out
}
