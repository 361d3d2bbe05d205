use super::SearchResult;

use vdir_core::{
    driver::Row,
    stmt::{SourceValues, Value},
};

/// Folds consecutive rows of one entry into a single result.
///
/// Rows arrive ordered by primary key, so all rows of an entry are adjacent.
/// A row whose key is incomplete belongs to no entry and is dropped.
#[derive(Debug)]
pub(crate) struct Merge {
    /// `alias.field` name of each column
    columns: Vec<String>,

    /// Positions of the entry key columns
    key: Vec<usize>,

    /// Entry being accumulated
    current: Option<SearchResult>,
}

impl Merge {
    pub(crate) fn new(columns: Vec<String>, key: Vec<usize>) -> Merge {
        Merge {
            columns,
            key,
            current: None,
        }
    }

    /// Adds a row. Returns the previous entry once a row of another entry
    /// arrives.
    pub(crate) fn push(&mut self, row: Row) -> Option<SearchResult> {
        let key: Vec<Value> = self
            .key
            .iter()
            .map(|&index| row.get(index).cloned().unwrap_or_default())
            .collect();

        if key.iter().any(Value::is_null) {
            tracing::trace!("dropping row without a primary key");
            return None;
        }

        let mut source_values = SourceValues::new();
        for (column, value) in self.columns.iter().zip(row) {
            source_values.add(column, value);
        }

        if let Some(current) = &mut self.current {
            if current.key == key {
                current.source_values.merge(&source_values);
                return None;
            }
        }

        self.current.replace(SearchResult { key, source_values })
    }

    /// The last entry, once the rows are exhausted.
    pub(crate) fn finish(&mut self) -> Option<SearchResult> {
        self.current.take()
    }
}
