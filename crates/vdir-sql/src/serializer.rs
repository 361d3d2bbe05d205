#[macro_use]
mod fmt;
use fmt::ToSql;

mod delim;
use delim::{Comma, Delimited, Period};

mod filter;

mod flavor;
pub use flavor::Flavor;

mod ident;
use ident::Ident;

mod params;
pub use params::{Params, Placeholder, TypedValue};

mod statement;

use vdir_core::{
    schema::{FieldConfig, Partition, SourceConfig},
    stmt::Statement,
};

/// Serialize a statement to a SQL string
#[derive(Debug)]
pub struct Serializer<'a> {
    /// Partition whose source configs name the tables and columns
    partition: &'a Partition,

    /// The database flavor handles the differences between SQL dialects.
    flavor: Flavor,
}

struct Formatter<'a, T> {
    /// Handle to the serializer
    serializer: &'a Serializer<'a>,

    /// Where to write the serialized SQL
    dst: &'a mut String,

    /// Where to store parameters
    params: &'a mut T,

    /// Tables field references resolve against
    scope: &'a Scope<'a>,
}

/// Resolves the field references of one statement.
enum Scope<'a> {
    /// Mutations name fields of their single source, unqualified.
    Source(Option<&'a SourceConfig>),

    /// Queries name fields as `alias.field`.
    Tables(Vec<(&'a str, &'a SourceConfig)>),
}

/// A field reference resolved for output.
struct Column<'a> {
    alias: Option<&'a str>,
    name: &'a str,
    config: Option<&'a FieldConfig>,
}

impl<'a> Serializer<'a> {
    /// Serializes `stmt`, pushing its bound values into `params` in
    /// placeholder order.
    pub fn serialize(&self, stmt: &Statement, params: &mut impl Params) -> String {
        let mut ret = String::new();

        let scope = match stmt {
            Statement::Select(select) => Scope::Tables(
                select
                    .tables
                    .iter()
                    .filter_map(|table| {
                        let config = self.partition.source(&table.source)?;
                        Some((&table.alias[..], config))
                    })
                    .collect(),
            ),
            stmt => Scope::Source(stmt.source().and_then(|name| self.partition.source(name))),
        };

        let mut fmt = Formatter {
            serializer: self,
            dst: &mut ret,
            params,
            scope: &scope,
        };

        stmt.to_sql(&mut fmt);

        ret.push(';');
        ret
    }

    fn source(&self, name: &str) -> Option<&'a SourceConfig> {
        self.partition.source(name)
    }
}

impl<'a, T: Params> Formatter<'a, T> {
    /// Serializes into a separate buffer sharing this formatter's params.
    fn nested(&mut self, f: impl FnOnce(&mut Formatter<'_, T>)) -> String {
        let mut dst = String::new();
        let mut fmt = Formatter {
            serializer: self.serializer,
            dst: &mut dst,
            params: &mut *self.params,
            scope: self.scope,
        };
        f(&mut fmt);
        dst
    }

    /// Resolves `alias.field` (queries) or `field` (mutations).
    fn column<'b>(&self, name: &'b str) -> Column<'b>
    where
        'a: 'b,
    {
        match self.scope {
            Scope::Source(_) => self.resolve(None, name),
            Scope::Tables(_) => match name.split_once('.') {
                Some((alias, field)) => self.resolve(Some(alias), field),
                None => self.resolve(None, name),
            },
        }
    }

    fn resolve<'b>(&self, alias: Option<&'b str>, field: &'b str) -> Column<'b>
    where
        'a: 'b,
    {
        let source = match (self.scope, alias) {
            (Scope::Source(source), _) => *source,
            (Scope::Tables(tables), Some(alias)) => tables
                .iter()
                .find(|(table, _)| *table == alias)
                .map(|(_, source)| *source),
            (Scope::Tables(_), None) => None,
        };

        let config = source.and_then(|source| source.field(field));

        Column {
            alias,
            name: config.map(|config| config.column_name()).unwrap_or(field),
            config,
        }
    }
}
