use super::{CompareOp, Filter};
use crate::stmt::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct SimpleFilter {
    pub attribute: String,
    pub op: CompareOp,
    pub value: Value,
}

impl SimpleFilter {
    pub fn new(attribute: impl Into<String>, op: CompareOp, value: impl Into<Value>) -> SimpleFilter {
        SimpleFilter {
            attribute: attribute.into(),
            op,
            value: value.into(),
        }
    }

    /// The value with one level of single quotes removed, if present.
    pub fn unquoted_value(&self) -> Value {
        match &self.value {
            Value::String(value) if value.len() >= 2 && value.starts_with('\'') && value.ends_with('\'') => {
                Value::from(&value[1..value.len() - 1])
            }
            value => value.clone(),
        }
    }
}

impl Filter {
    pub fn is_simple(&self) -> bool {
        matches!(self, Filter::Simple(_))
    }
}
