//! Translates directory requests into backend statements.
//!
//! Every builder works on a [`Context`]: the ordered source mappings of one
//! entry (primary first) and the already resolved source values. Builders
//! are created per operation and consumed by `generate`.

mod add;
pub use add::AddBuilder;

mod aliases;
pub use aliases::Aliases;

mod delete;
pub use delete::DeleteBuilder;

mod modify;
pub use modify::ModifyBuilder;

mod modrdn;
pub use modrdn::ModRdnBuilder;

mod rewrite;
pub use rewrite::{FilterRewriter, RewrittenFilter};

mod search;
pub use search::SearchBuilder;

use vdir_core::{
    schema::{EntryMapping, FieldMapping, Partition, SourceConfig, SourceMapping},
    stmt::{Assignment, Delete, Insert, SourceValues, Value},
    Error, Filter, Interpreter, Result,
};

/// The inputs shared by every builder of one directory operation.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub partition: &'a Partition,
    pub entry: &'a EntryMapping,

    /// Source mappings taking part in the operation. The first one is the
    /// primary source.
    pub sources: &'a [SourceMapping],

    /// Prior state of the entry's backing rows
    pub source_values: &'a SourceValues,
}

impl<'a> Context<'a> {
    pub fn new(
        partition: &'a Partition,
        entry: &'a EntryMapping,
        sources: &'a [SourceMapping],
        source_values: &'a SourceValues,
    ) -> Context<'a> {
        Context {
            partition,
            entry,
            sources,
            source_values,
        }
    }

    /// Splits the sources into the primary and the secondaries.
    pub fn split(&self) -> Result<(&'a SourceMapping, &'a [SourceMapping])> {
        match self.sources.split_first() {
            Some((primary, secondaries)) => Ok((primary, secondaries)),
            None => Err(Error::invalid_mapping(format!(
                "entry `{}` has no sources",
                self.entry.dn
            ))),
        }
    }

    pub fn config(&self, mapping: &SourceMapping) -> Result<&'a SourceConfig> {
        self.partition.source_config(mapping)
    }

    /// Identifies the existing rows of a source by the values it already
    /// holds: one equality per field, on the field's first value.
    pub fn prior_filter(&self, mapping: &SourceMapping) -> Result<Option<Filter>> {
        let config = self.config(mapping)?;
        let mut operands = vec![];

        for (field, values) in self.source_values.source(&mapping.name) {
            let Some(value) = values.first() else {
                continue;
            };
            config.expect_field(field)?;
            operands.push(Filter::eq(field, value.clone()));
        }

        Ok(Filter::and_all(operands))
    }

    /// Identifies the rows of a source through its variables, looked up in
    /// the prior source values. This is how dependent rows are found from
    /// their parent's key.
    pub fn variable_filter(&self, mapping: &SourceMapping) -> Option<Filter> {
        Filter::and_all(mapping.fields.iter().filter_map(|field| {
            let value = self.source_values.get_one(field.variable()?)?;
            Some(Filter::eq(&field.name, value.clone()))
        }))
    }

    /// Foreign-key fields, valued from the prior source values.
    pub fn foreign_key_values(&self, mapping: &SourceMapping) -> Vec<Assignment> {
        mapping
            .foreign_keys()
            .filter_map(|field| {
                let value = self.source_values.get_one(field.variable()?)?;
                Some(Assignment::new(&field.name, value.clone()))
            })
            .collect()
    }

    /// Evaluates `fields` against the interpreter's current bindings,
    /// skipping null results.
    pub fn eval_fields<'b>(
        &self,
        mapping: &SourceMapping,
        fields: impl IntoIterator<Item = &'b FieldMapping>,
        interpreter: &mut dyn Interpreter,
    ) -> Result<Vec<Assignment>> {
        let config = self.config(mapping)?;
        let mut assignments = vec![];

        for field in fields {
            let value = interpreter.eval_field(field)?;
            if value.is_null() {
                continue;
            }
            config.expect_field(&field.name)?;
            tracing::trace!(source = %mapping.name, field = %field.name, %value, "evaluated field");
            assignments.push(Assignment::new(&field.name, value));
        }

        Ok(assignments)
    }

    /// An insert of the foreign keys followed by `row`.
    pub fn insert(&self, mapping: &SourceMapping, row: Vec<Assignment>) -> Result<Insert> {
        let mut insert = Insert::new(self.config(mapping)?.name.clone());

        for assignment in self.foreign_key_values(mapping) {
            if !row.iter().any(|a| a.field == assignment.field) {
                insert.assignments.push(assignment);
            }
        }
        insert.assignments.extend(row);

        Ok(insert)
    }

    /// A delete of the dependent rows found through the source's variables,
    /// optionally narrowed to the rows holding `row`.
    pub fn delete(&self, mapping: &SourceMapping, row: Vec<Assignment>) -> Result<Delete> {
        let narrow = row
            .into_iter()
            .map(|assignment| Filter::eq(assignment.field, assignment.value));
        let filter = Filter::and_all(self.variable_filter(mapping).into_iter().chain(narrow));

        Ok(Delete::new(
            self.config(mapping)?.name.clone(),
            Some(constrained(mapping, "delete", filter)?),
        ))
    }
}

/// Refuses statements that would touch every row of a source.
pub(crate) fn constrained(mapping: &SourceMapping, op: &str, filter: Option<Filter>) -> Result<Filter> {
    filter.ok_or_else(|| {
        Error::invalid_mapping(format!(
            "refusing unconstrained {op} on source `{}`: no prior values identify its rows",
            mapping.name
        ))
    })
}

/// Resets the interpreter to the prior source values plus `bindings`.
pub(crate) fn bind<'v>(
    interpreter: &mut dyn Interpreter,
    source_values: &SourceValues,
    bindings: impl IntoIterator<Item = (&'v str, &'v Value)>,
) {
    interpreter.clear();
    interpreter.set_values(source_values);
    for (name, value) in bindings {
        interpreter.set(name, value.clone());
    }
}
