use super::{bind, constrained, Context};

use vdir_core::{
    request::{Modification, ModificationOp, ModifyRequest},
    schema::SourceMapping,
    stmt::{Statement, Update, Value},
    Interpreter, Result,
};

/// Builds the statements applying attribute modifications to an entry.
///
/// All modifications touching the primary source fold into one update.
/// Secondary sources hold one row per attribute value, so their values are
/// inserted and deleted row by row.
pub struct ModifyBuilder<'a> {
    cx: Context<'a>,
    interpreter: &'a mut dyn Interpreter,
}

impl<'a> ModifyBuilder<'a> {
    pub fn new(cx: Context<'a>, interpreter: &'a mut dyn Interpreter) -> ModifyBuilder<'a> {
        ModifyBuilder { cx, interpreter }
    }

    pub fn generate(mut self, request: &ModifyRequest) -> Result<Vec<Statement>> {
        tracing::debug!(dn = %request.dn, modifications = request.modifications.len(), "building modify");

        let (primary, secondaries) = self.cx.split()?;
        let mut statements = vec![];

        if let Some(update) = self.primary(primary, request)? {
            statements.push(update.into());
        }

        for source in secondaries {
            for modification in &request.modifications {
                self.secondary(source, modification, &mut statements)?;
            }
        }

        self.interpreter.clear();
        Ok(statements)
    }

    fn primary(&mut self, source: &SourceMapping, request: &ModifyRequest) -> Result<Option<Update>> {
        let mut update = Update::new(self.cx.config(source)?.name.clone());

        for modification in &request.modifications {
            let attribute = &modification.attribute;

            match modification.op {
                ModificationOp::Add | ModificationOp::Replace => {
                    let first = attribute
                        .first()
                        .map(|value| (attribute.name.as_str(), value));
                    bind(&mut *self.interpreter, self.cx.source_values, first);

                    let assignments =
                        self.cx
                            .eval_fields(source, source.own_fields(), &mut *self.interpreter)?;

                    for assignment in assignments {
                        update.set(assignment.field, assignment.value);
                    }
                }
                ModificationOp::Delete => {
                    for field in &source.fields {
                        if field.value.is_driven_by(&attribute.name) {
                            update.set(&field.name, Value::Null);
                        }
                    }
                }
            }
        }

        if update.assignments.is_empty() {
            tracing::debug!(source = %source.name, "primary source unchanged");
            return Ok(None);
        }

        update.filter = Some(constrained(source, "update", self.cx.prior_filter(source)?)?);
        Ok(Some(update))
    }

    fn secondary(
        &mut self,
        source: &SourceMapping,
        modification: &Modification,
        statements: &mut Vec<Statement>,
    ) -> Result<()> {
        let attribute = &modification.attribute;

        if attribute.values.is_empty() {
            // An attribute without values removes every row it drives,
            // whatever the operation
            let driven = source
                .fields
                .iter()
                .any(|field| field.value.is_driven_by(&attribute.name));

            if driven {
                tracing::debug!(source = %source.name, attribute = %attribute.name, "deleting all rows");
                statements.push(self.cx.delete(source, vec![])?.into());
            }
            return Ok(());
        }

        let mut first = true;

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

            match modification.op {
                ModificationOp::Add => {
                    statements.push(self.cx.insert(source, row)?.into());
                }
                ModificationOp::Replace => {
                    if first {
                        statements.push(self.cx.delete(source, vec![])?.into());
                        first = false;
                    }
                    statements.push(self.cx.insert(source, row)?.into());
                }
                ModificationOp::Delete => {
                    statements.push(self.cx.delete(source, row)?.into());
                }
            }
        }

        Ok(())
    }
}
