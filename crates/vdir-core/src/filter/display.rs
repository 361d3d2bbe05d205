use super::{CompareOp, Filter, SubstringPart};
use crate::stmt::Value;

use std::fmt;

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::And(operands) => {
                f.write_str("(&")?;
                for operand in operands {
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
            Filter::Or(operands) => {
                f.write_str("(|")?;
                for operand in operands {
                    write!(f, "{operand}")?;
                }
                f.write_str(")")
            }
            Filter::Not(operand) => write!(f, "(!{operand})"),
            Filter::Simple(filter) => {
                write!(f, "({}{}", filter.attribute, filter.op)?;
                write_value(f, &filter.value)?;
                f.write_str(")")
            }
            Filter::Substring(filter) => {
                write!(f, "({}=", filter.attribute)?;
                for part in &filter.parts {
                    match part {
                        SubstringPart::Any => f.write_str("*")?,
                        SubstringPart::Text(text) => write_escaped(f, text)?,
                    }
                }
                f.write_str(")")
            }
            Filter::Present(attribute) => write!(f, "({attribute}=*)"),
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareOp::Eq => "=",
            CompareOp::Ge => ">=",
            CompareOp::Le => "<=",
            CompareOp::Approx => "~=",
            CompareOp::Like => " like ",
        })
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::String(value) => write_escaped(f, value),
        value => write!(f, "{value}"),
    }
}

/// RFC 4515 value escaping
fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    for ch in value.chars() {
        match ch {
            '*' | '(' | ')' | '\\' | '\0' => write!(f, "\\{:02x}", ch as u32)?,
            ch => write!(f, "{ch}")?,
        }
    }
    Ok(())
}
