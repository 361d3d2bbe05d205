use super::{Aliases, Context};

use vdir_core::{
    filter::{CompareOp, SimpleFilter, SubstringFilter},
    schema::SourceMapping,
    stmt::Value,
    Filter, Interpreter, Result,
};

/// Rewrites a filter over virtual attributes into a filter over
/// `alias.field` pairs of the entry's sources.
///
/// The primary source keeps its own name as alias. Each node touching a
/// secondary source introduces a fresh alias for it, so that independent
/// conditions on a multi-valued source may match different rows.
pub struct FilterRewriter<'a> {
    cx: Context<'a>,
    interpreter: &'a mut dyn Interpreter,
    aliases: Aliases,
}

/// The output of [`FilterRewriter`].
#[derive(Debug, Clone, Default)]
pub struct RewrittenFilter {
    /// `None` when nothing constrains the query
    pub filter: Option<Filter>,

    /// Aliases introduced for secondary sources
    pub aliases: Aliases,
}

impl<'a> FilterRewriter<'a> {
    pub fn new(cx: Context<'a>, interpreter: &'a mut dyn Interpreter) -> FilterRewriter<'a> {
        FilterRewriter {
            cx,
            interpreter,
            aliases: Aliases::new(cx.entry.sources.iter().chain(cx.sources)),
        }
    }

    /// Rewrites `filter` and ANDs in the prior source values.
    pub fn rewrite(mut self, filter: Option<&Filter>) -> Result<RewrittenFilter> {
        let prior = self.prior_values()?;

        let filter = match filter {
            Some(filter) => self.filter(filter)?,
            None => None,
        };
        self.interpreter.clear();

        let filter = Filter::and(prior, filter);
        tracing::debug!(
            filter = %filter.as_ref().map(|filter| filter.to_string()).unwrap_or_default(),
            aliases = self.aliases.len(),
            "rewrote filter"
        );

        Ok(RewrittenFilter {
            filter,
            aliases: self.aliases,
        })
    }

    fn filter(&mut self, filter: &Filter) -> Result<Option<Filter>> {
        match filter {
            Filter::And(operands) => {
                let mut rewritten = vec![];
                for operand in operands {
                    rewritten.extend(self.filter(operand)?);
                }
                Ok(Filter::and_all(rewritten))
            }
            Filter::Or(operands) => {
                let mut rewritten = vec![];
                for operand in operands {
                    rewritten.extend(self.filter(operand)?);
                }
                Ok(Filter::or_all(rewritten))
            }
            Filter::Not(operand) => Ok(self.filter(operand)?.map(Filter::not)),
            Filter::Simple(filter) => self.simple(filter),
            Filter::Substring(filter) => Ok(self.substring(filter)),
            Filter::Present(attribute) => Ok(self.present(attribute)),
        }
    }

    /// Evaluates every field of every source with the attribute bound to
    /// the filter value. Each field yielding a value contributes one
    /// comparison; fields yielding null contribute nothing.
    fn simple(&mut self, filter: &SimpleFilter) -> Result<Option<Filter>> {
        let op = match filter.op {
            CompareOp::Approx => CompareOp::Eq,
            op => op,
        };

        let attribute = self.attribute_name(&filter.attribute);
        self.interpreter.clear();
        self.interpreter.set(&attribute, filter.unquoted_value());

        let sources = self.cx.sources;
        let mut operands = vec![];

        for (index, source) in sources.iter().enumerate() {
            let alias = self.alias(index, source);
            let mut used = false;

            for field in &source.fields {
                let value = self.interpreter.eval_field(field)?;
                if value.is_null() {
                    continue;
                }

                used = true;
                let name = format!("{alias}.{}", field.name);
                operands.extend(match value {
                    Value::List(values) => Filter::or_all(
                        values
                            .into_iter()
                            .map(|value| Filter::simple(&name, op, value)),
                    ),
                    value => Some(Filter::simple(name, op, value)),
                });
            }

            if used && index > 0 {
                self.aliases.register(alias, &source.name);
            }
        }

        self.interpreter.clear();
        Ok(Filter::and_all(operands))
    }

    /// Substrings only apply to attributes mapped straight onto one
    /// `source.field`.
    fn substring(&mut self, filter: &SubstringFilter) -> Option<Filter> {
        let variable = self.cx.entry.attribute(&filter.attribute)?.variable()?;
        let (source, field) = variable.split_once('.')?;
        let (index, mapping) = self
            .cx
            .sources
            .iter()
            .enumerate()
            .find(|(_, mapping)| mapping.name == source)?;

        let alias = self.alias(index, mapping);
        if index > 0 {
            self.aliases.register(&alias, source);
        }

        Some(Filter::simple(
            format!("{alias}.{field}"),
            CompareOp::Like,
            filter.like_pattern(),
        ))
    }

    /// Presence holds wherever a field is driven by the attribute.
    fn present(&mut self, attribute: &str) -> Option<Filter> {
        if attribute.eq_ignore_ascii_case("objectClass") {
            return None;
        }

        let sources = self.cx.sources;
        let mut operands = vec![];

        for (index, source) in sources.iter().enumerate() {
            let alias = self.alias(index, source);
            let mut used = false;

            for field in &source.fields {
                if !field.value.is_driven_by(attribute) {
                    continue;
                }

                used = true;
                operands.push(Filter::present(format!("{alias}.{}", field.name)));
            }

            if used && index > 0 {
                self.aliases.register(alias, &source.name);
            }
        }

        Filter::and_all(operands)
    }

    /// Values already known for one of the sources narrow the query to the
    /// rows holding them. Several values of one field are alternatives.
    fn prior_values(&mut self) -> Result<Option<Filter>> {
        let sources = self.cx.sources;
        let mut operands = vec![];

        for (index, source) in sources.iter().enumerate() {
            let config = self.cx.config(source)?;
            let alias = self.alias(index, source);
            let mut used = false;

            for (field, values) in self.cx.source_values.source(&source.name) {
                config.expect_field(field)?;
                used = true;

                let name = format!("{alias}.{field}");
                operands.extend(Filter::or_all(
                    values
                        .iter()
                        .map(|value| Filter::eq(&name, value.clone())),
                ));
            }

            if used && index > 0 {
                self.aliases.register(alias, &source.name);
            }
        }

        Ok(Filter::and_all(operands))
    }

    fn alias(&self, index: usize, source: &SourceMapping) -> String {
        if index == 0 {
            source.name.clone()
        } else {
            self.aliases.next(&source.name)
        }
    }

    /// Attribute names are case-insensitive; bind them under the spelling
    /// the entry's mappings use.
    fn attribute_name(&self, attribute: &str) -> String {
        match self.cx.entry.attribute(attribute) {
            Some(mapping) => mapping.name.clone(),
            None => attribute.to_string(),
        }
    }
}

impl RewrittenFilter {
    /// Values the filter binds, in the order the SQL serializer emits their
    /// placeholders.
    pub fn parameters(&self) -> Vec<Value> {
        let mut params = vec![];

        if let Some(filter) = &self.filter {
            filter.for_each_leaf(&mut |leaf| match leaf {
                Filter::Simple(filter) => match &filter.value {
                    Value::Null if matches!(filter.op, CompareOp::Eq | CompareOp::Approx) => {}
                    Value::List(values) => params.extend(values.iter().cloned()),
                    value => params.push(value.clone()),
                },
                Filter::Substring(filter) => params.push(Value::from(filter.like_pattern())),
                _ => {}
            });
        }

        params
    }
}
