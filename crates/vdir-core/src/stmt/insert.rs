use super::{Assignment, Statement};

#[derive(Debug, Clone, PartialEq)]
pub struct Insert {
    /// Source config the row is inserted into
    pub source: String,

    pub assignments: Vec<Assignment>,
}

impl Insert {
    pub fn new(source: impl Into<String>) -> Insert {
        Insert {
            source: source.into(),
            assignments: vec![],
        }
    }
}

impl From<Insert> for Statement {
    fn from(value: Insert) -> Self {
        Statement::Insert(value)
    }
}
