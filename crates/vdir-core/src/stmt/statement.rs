use super::{Delete, Insert, Select, Update};

/// A backend statement produced by a builder.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Insert(Insert),
    Update(Update),
    Delete(Delete),
    Select(Select),
}

impl Statement {
    /// The source config a mutation targets, or the primary table of a
    /// query.
    pub fn source(&self) -> Option<&str> {
        match self {
            Statement::Insert(stmt) => Some(&stmt.source),
            Statement::Update(stmt) => Some(&stmt.source),
            Statement::Delete(stmt) => Some(&stmt.source),
            Statement::Select(stmt) => stmt.tables.first().map(|table| &table.source[..]),
        }
    }

    pub fn is_insert(&self) -> bool {
        matches!(self, Statement::Insert(_))
    }

    pub fn is_update(&self) -> bool {
        matches!(self, Statement::Update(_))
    }

    pub fn is_delete(&self) -> bool {
        matches!(self, Statement::Delete(_))
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Statement::Select(_))
    }

    #[track_caller]
    pub fn as_insert_unwrap(&self) -> &Insert {
        match self {
            Statement::Insert(stmt) => stmt,
            _ => panic!("expected Insert; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn as_update_unwrap(&self) -> &Update {
        match self {
            Statement::Update(stmt) => stmt,
            _ => panic!("expected Update; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn as_delete_unwrap(&self) -> &Delete {
        match self {
            Statement::Delete(stmt) => stmt,
            _ => panic!("expected Delete; actual={self:#?}"),
        }
    }

    #[track_caller]
    pub fn as_select_unwrap(&self) -> &Select {
        match self {
            Statement::Select(stmt) => stmt,
            _ => panic!("expected Select; actual={self:#?}"),
        }
    }
}
