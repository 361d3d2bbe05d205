use super::{bind, constrained, Context};

use vdir_core::{
    request::ModRdnRequest,
    schema::SourceMapping,
    stmt::{SourceValues, Statement, Update},
    Interpreter, Result,
};

/// Builds the updates renaming an entry.
///
/// The primary row is recomputed from the new RDN and located through its
/// old values. Its new values are then carried over to the secondary
/// sources, so dependent rows follow the renamed parent's key. Dependent
/// rows are updated before their parent: each secondary update is put in
/// front of the statements built so far.
pub struct ModRdnBuilder<'a> {
    cx: Context<'a>,
    interpreter: &'a mut dyn Interpreter,
}

impl<'a> ModRdnBuilder<'a> {
    pub fn new(cx: Context<'a>, interpreter: &'a mut dyn Interpreter) -> ModRdnBuilder<'a> {
        ModRdnBuilder { cx, interpreter }
    }

    pub fn generate(mut self, request: &ModRdnRequest) -> Result<Vec<Statement>> {
        tracing::debug!(dn = %request.dn, new_rdn = %request.new_rdn, "building modrdn");

        let (primary, secondaries) = self.cx.split()?;
        let mut statements = vec![];
        let mut new_values = self.cx.source_values.clone();

        if let Some(update) = self.primary(primary, request, &mut new_values)? {
            statements.push(update.into());
        }

        for source in secondaries {
            if let Some(update) = self.secondary(source, request, &new_values)? {
                statements.insert(0, update.into());
            }
        }

        self.interpreter.clear();
        Ok(statements)
    }

    fn primary(
        &mut self,
        source: &SourceMapping,
        request: &ModRdnRequest,
        new_values: &mut SourceValues,
    ) -> Result<Option<Update>> {
        bind(&mut *self.interpreter, self.cx.source_values, request.new_rdn.iter());

        let assignments = self
            .cx
            .eval_fields(source, &source.fields, &mut *self.interpreter)?;

        if assignments.is_empty() {
            tracing::debug!(source = %source.name, "primary source unchanged");
            return Ok(None);
        }

        let mut update = Update::new(self.cx.config(source)?.name.clone());
        for assignment in assignments {
            new_values.set(format!("{}.{}", source.name, assignment.field), assignment.value.clone());
            update.set(assignment.field, assignment.value);
        }

        update.filter = Some(constrained(source, "update", self.cx.prior_filter(source)?)?);
        Ok(Some(update))
    }

    fn secondary(
        &mut self,
        source: &SourceMapping,
        request: &ModRdnRequest,
        new_values: &SourceValues,
    ) -> Result<Option<Update>> {
        bind(&mut *self.interpreter, new_values, request.new_rdn.iter());

        let assignments = self
            .cx
            .eval_fields(source, &source.fields, &mut *self.interpreter)?;

        if assignments.is_empty() {
            tracing::debug!(source = %source.name, "secondary source unchanged");
            return Ok(None);
        }

        let mut update = Update::new(self.cx.config(source)?.name.clone());
        for assignment in assignments {
            update.set(assignment.field, assignment.value);
        }

        // Rows are found through the parent's old key
        update.filter = Some(constrained(source, "update", self.cx.variable_filter(source))?);
        Ok(Some(update))
    }
}
