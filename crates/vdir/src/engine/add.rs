use super::{bind, Context};

use vdir_core::{
    request::AddRequest,
    schema::SourceMapping,
    stmt::{Insert, Statement},
    Interpreter, Result,
};

/// Builds the inserts creating an entry.
///
/// The primary row is inserted first. Each value of each attribute then
/// yields at most one dependent row per secondary source, so parents exist
/// before the rows referencing them.
pub struct AddBuilder<'a> {
    cx: Context<'a>,
    interpreter: &'a mut dyn Interpreter,
}

impl<'a> AddBuilder<'a> {
    pub fn new(cx: Context<'a>, interpreter: &'a mut dyn Interpreter) -> AddBuilder<'a> {
        AddBuilder { cx, interpreter }
    }

    pub fn generate(mut self, request: &AddRequest) -> Result<Vec<Statement>> {
        let (primary, secondaries) = self.cx.split()?;
        let mut statements = vec![];

        statements.push(self.primary(primary, request)?.into());

        for source in secondaries {
            self.secondary(source, request, &mut statements)?;
        }

        self.interpreter.clear();
        Ok(statements)
    }

    /// Multi-valued attributes only contribute their first value to the
    /// primary row.
    fn primary(&mut self, source: &SourceMapping, request: &AddRequest) -> Result<Insert> {
        tracing::debug!(source = %source.name, "building primary insert");

        let first_values = request
            .attributes
            .iter()
            .filter_map(|attribute| Some((attribute.name.as_str(), attribute.first()?)));
        bind(&mut *self.interpreter, self.cx.source_values, first_values);

        let mut insert = Insert::new(self.cx.config(source)?.name.clone());
        insert.assignments = self
            .cx
            .eval_fields(source, &source.fields, &mut *self.interpreter)?;

        Ok(insert)
    }

    fn secondary(
        &mut self,
        source: &SourceMapping,
        request: &AddRequest,
        statements: &mut Vec<Statement>,
    ) -> Result<()> {
        tracing::debug!(source = %source.name, "building secondary inserts");

        for attribute in &request.attributes {
            for value in &attribute.values {
                bind(
                    &mut *self.interpreter,
                    self.cx.source_values,
                    [(attribute.name.as_str(), value)],
                );

                let row = self
                    .cx
                    .eval_fields(source, source.own_fields(), &mut *self.interpreter)?;

                if row.is_empty() {
                    continue;
                }

                statements.push(self.cx.insert(source, row)?.into());
            }
        }

        Ok(())
    }
}
