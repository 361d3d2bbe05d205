use super::{Assignment, Statement, Value};
use crate::Filter;

#[derive(Debug, Clone, PartialEq)]
pub struct Update {
    /// Source config being updated
    pub source: String,

    pub assignments: Vec<Assignment>,

    /// Identifies the rows to update, in terms of bare field names
    pub filter: Option<Filter>,
}

impl Update {
    pub fn new(source: impl Into<String>) -> Update {
        Update {
            source: source.into(),
            assignments: vec![],
            filter: None,
        }
    }

    /// Sets `field`, replacing an earlier assignment to the same field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        let field = field.into();
        let value = value.into();

        match self.assignments.iter_mut().find(|a| a.field == field) {
            Some(assignment) => assignment.value = value,
            None => self.assignments.push(Assignment { field, value }),
        }
    }
}

impl From<Update> for Statement {
    fn from(value: Update) -> Self {
        Statement::Update(value)
    }
}
