use super::{constrained, Context};

use vdir_core::{
    request::DeleteRequest,
    schema::SourceMapping,
    stmt::{Delete, Statement},
    Result,
};

/// Builds the deletes removing an entry.
///
/// Dependent rows go first: each secondary delete is put in front of the
/// statements built so far, and the primary row is removed last.
pub struct DeleteBuilder<'a> {
    cx: Context<'a>,
}

impl<'a> DeleteBuilder<'a> {
    pub fn new(cx: Context<'a>) -> DeleteBuilder<'a> {
        DeleteBuilder { cx }
    }

    pub fn generate(self, request: &DeleteRequest) -> Result<Vec<Statement>> {
        tracing::debug!(dn = %request.dn, "building deletes");

        let (primary, secondaries) = self.cx.split()?;
        let mut statements = vec![self.primary(primary)?.into()];

        for source in secondaries {
            tracing::debug!(source = %source.name, "building secondary delete");
            statements.insert(0, self.cx.delete(source, vec![])?.into());
        }

        Ok(statements)
    }

    fn primary(&self, source: &SourceMapping) -> Result<Delete> {
        tracing::debug!(source = %source.name, "building primary delete");

        let filter = constrained(source, "delete", self.cx.prior_filter(source)?)?;
        Ok(Delete::new(self.cx.config(source)?.name.clone(), Some(filter)))
    }
}
