mod template;
pub use template::TemplateInterpreter;

use crate::{
    request::Attributes,
    schema::{AttributeMapping, Expression, FieldMapping, MappingValue},
    stmt::{SourceValues, Value},
    Result,
};

/// Evaluates field and attribute mappings against a context of named
/// values.
///
/// An interpreter is scoped to a single directory operation. Builders
/// `clear` and refill it between rows.
pub trait Interpreter: Send {
    /// Binds `name` in the evaluation context.
    fn set(&mut self, name: &str, value: Value);

    fn get(&self, name: &str) -> Option<&Value>;

    /// Removes every binding.
    fn clear(&mut self);

    /// Runs a script against the current context. Absent inputs evaluate to
    /// null rather than failing.
    fn eval_script(&mut self, script: &str) -> Result<Value>;

    /// Binds every source value. A single value is bound as is, several as a
    /// list.
    fn set_values(&mut self, values: &SourceValues) {
        for (name, values) in values.iter() {
            self.set(name, Value::from_vec(values.to_vec()));
        }
    }

    /// Binds every request attribute by its name.
    fn set_attributes(&mut self, attributes: &Attributes) {
        for attribute in attributes.iter() {
            self.set(&attribute.name, Value::from_vec(attribute.values.clone()));
        }
    }

    /// Evaluates a field mapping. Variables fall back from `rdn.name` to
    /// `name`.
    fn eval_field(&mut self, field: &FieldMapping) -> Result<Value> {
        self.eval(&field.value, "rdn.")
            .map_err(|err| err.context(err!("evaluating field `{}`", field.name)))
    }

    /// Evaluates an attribute mapping. Variables fall back from
    /// `primaryKey.name` to `name`.
    fn eval_attribute(&mut self, attribute: &AttributeMapping) -> Result<Value> {
        self.eval(&attribute.value, "primaryKey.")
            .map_err(|err| err.context(err!("evaluating attribute `{}`", attribute.name)))
    }

    fn eval(&mut self, value: &MappingValue, fallback_prefix: &str) -> Result<Value> {
        match value {
            MappingValue::Constant(constant) => Ok(Value::from(constant)),
            MappingValue::Variable(name) => {
                let value = match self.get(name) {
                    Some(value) if !value.is_null() => Some(value),
                    _ => name
                        .strip_prefix(fallback_prefix)
                        .and_then(|name| self.get(name)),
                };
                Ok(value.cloned().unwrap_or_default())
            }
            MappingValue::Expression(expression) => self.eval_expression(expression),
        }
    }

    /// Runs an expression. With `foreach`, the script runs once per value of
    /// the `foreach` variable bound to `var`; null results are dropped and
    /// the rest collected.
    fn eval_expression(&mut self, expression: &Expression) -> Result<Value> {
        let Some(foreach) = &expression.foreach else {
            return self.eval_script(&expression.script);
        };

        let Some(values) = self.get(foreach).cloned() else {
            return Ok(Value::Null);
        };

        let var = expression.var.as_deref().unwrap_or(foreach);
        let mut results = vec![];

        for value in values.into_vec() {
            self.set(var, value);
            let result = self.eval_script(&expression.script)?;
            if !result.is_null() && !results.contains(&result) {
                results.push(result);
            }
        }

        Ok(Value::from_vec(results))
    }
}
