use super::Statement;
use crate::Filter;

#[derive(Debug, Clone, PartialEq)]
pub struct Delete {
    /// Source config rows are deleted from
    pub source: String,

    /// Identifies the rows to delete, in terms of bare field names
    pub filter: Option<Filter>,
}

impl Delete {
    pub fn new(source: impl Into<String>, filter: Option<Filter>) -> Delete {
        Delete {
            source: source.into(),
            filter,
        }
    }
}

impl From<Delete> for Statement {
    fn from(value: Delete) -> Self {
        Statement::Delete(value)
    }
}
