use super::{Context, FilterRewriter};

use vdir_core::{
    request::SearchRequest,
    schema::SourceMapping,
    stmt::{FieldRef, Join, JoinType, Select, TableRef},
    Error, Interpreter, Result,
};

/// Builds the query reading the entries matching a search.
///
/// Every source is joined once under its own name and all of its fields are
/// selected. Aliases introduced by the filter are joined again, the same
/// way. Rows come back ordered by the primary keys of every source, so rows
/// of one entry are adjacent.
pub struct SearchBuilder<'a> {
    cx: Context<'a>,
    interpreter: &'a mut dyn Interpreter,
}

impl<'a> SearchBuilder<'a> {
    pub fn new(cx: Context<'a>, interpreter: &'a mut dyn Interpreter) -> SearchBuilder<'a> {
        SearchBuilder { cx, interpreter }
    }

    pub fn generate(mut self, request: &SearchRequest) -> Result<Select> {
        let (primary, _) = self.cx.split()?;
        self.check_connection(primary)?;

        let mut select = Select::new();

        for (index, source) in self.cx.sources.iter().enumerate() {
            let config = self.cx.config(source)?;

            for field in &config.fields {
                select.fields.push(FieldRef::new(&source.name, &field.name));
            }

            let join = match index {
                0 => None,
                _ => Some(self.join(source, &source.name)?),
            };
            select.tables.push(TableRef {
                alias: source.name.clone(),
                source: config.name.clone(),
                join,
            });

            for field in config.primary_keys() {
                select.order_by.push(FieldRef::new(&source.name, &field.name));
            }

            if let Some(filter) = &config.filter {
                select.sql_filters.push(filter.clone());
            }
        }

        let rewritten = FilterRewriter::new(self.cx, &mut *self.interpreter)
            .rewrite(request.filter.as_ref())?;

        for (alias, name) in rewritten.aliases.iter() {
            let source = self
                .cx
                .sources
                .iter()
                .find(|source| source.name == name)
                .ok_or_else(|| Error::unknown_source(name))?;

            select.tables.push(TableRef {
                alias: alias.to_string(),
                source: self.cx.config(source)?.name.clone(),
                join: Some(self.join(source, alias)?),
            });
        }

        select.filter = rewritten.filter;

        tracing::debug!(
            tables = select.tables.len(),
            fields = select.fields.len(),
            "built search"
        );

        Ok(select)
    }

    /// Joins `source` under `alias` through its foreign keys. Required
    /// sources are inner joined, the others left joined.
    fn join(&self, source: &SourceMapping, alias: &str) -> Result<Join> {
        let mut on = vec![];

        for field in source.fields.iter() {
            let Some((parent, parent_field)) = field.foreign_key() else {
                continue;
            };
            on.push((
                FieldRef::new(alias, &field.name),
                FieldRef::new(parent, parent_field),
            ));
        }

        if on.is_empty() {
            return Err(Error::invalid_mapping(format!(
                "secondary source `{}` has no foreign key to join on",
                source.name
            )));
        }

        Ok(Join {
            ty: if source.required {
                JoinType::Inner
            } else {
                JoinType::Left
            },
            on,
        })
    }

    /// A single query can only span one connection.
    fn check_connection(&self, primary: &SourceMapping) -> Result<()> {
        let connection = &self.cx.config(primary)?.connection;

        for source in self.cx.sources {
            let config = self.cx.config(source)?;
            if config.connection != *connection {
                return Err(Error::invalid_mapping(format!(
                    "sources `{}` and `{}` live on different connections",
                    primary.name, source.name
                )));
            }
        }

        Ok(())
    }
}
