use super::Statement;
use crate::Filter;

use std::fmt;

/// A query over the sources of an entry.
///
/// The first table is the primary source; every following table carries the
/// join that attaches it. Filters refer to fields as `alias.field`.
#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub distinct: bool,

    /// Selected fields, in result column order
    pub fields: Vec<FieldRef>,

    pub tables: Vec<TableRef>,

    pub filter: Option<Filter>,

    /// Raw SQL predicates ANDed into the WHERE clause
    pub sql_filters: Vec<String>,

    pub order_by: Vec<FieldRef>,
}

/// `alias.field`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub alias: String,
    pub field: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRef {
    pub alias: String,

    /// Source config of the table
    pub source: String,

    /// `None` for the first table
    pub join: Option<Join>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub ty: JoinType,

    /// Column equalities, ANDed
    pub on: Vec<(FieldRef, FieldRef)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
}

impl Select {
    pub fn new() -> Select {
        Select {
            distinct: true,
            fields: vec![],
            tables: vec![],
            filter: None,
            sql_filters: vec![],
            order_by: vec![],
        }
    }

    pub fn table(&self, alias: &str) -> Option<&TableRef> {
        self.tables.iter().find(|table| table.alias == alias)
    }
}

impl Default for Select {
    fn default() -> Self {
        Select::new()
    }
}

impl FieldRef {
    pub fn new(alias: impl Into<String>, field: impl Into<String>) -> FieldRef {
        FieldRef {
            alias: alias.into(),
            field: field.into(),
        }
    }

    /// Parses `alias.field`.
    pub fn parse(name: &str) -> Option<FieldRef> {
        let (alias, field) = name.split_once('.')?;
        Some(FieldRef::new(alias, field))
    }
}

impl fmt::Display for FieldRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.alias, self.field)
    }
}

impl From<Select> for Statement {
    fn from(value: Select) -> Self {
        Statement::Select(value)
    }
}
