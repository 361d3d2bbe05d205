use super::Value;

/// `field = value` in an INSERT column list or UPDATE SET list.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub field: String,
    pub value: Value,
}

impl Assignment {
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Assignment {
        Assignment {
            field: field.into(),
            value: value.into(),
        }
    }
}
