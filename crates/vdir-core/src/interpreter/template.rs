use super::Interpreter;
use crate::{stmt::Value, Error, Result};

use std::collections::HashMap;

/// Interpreter for `${name}` templates.
///
/// A script made of exactly one reference yields the referenced value
/// unchanged, so `${id}` keeps an integer an integer. Any other script is
/// rendered to a string. If any referenced name is unbound the result is
/// null.
#[derive(Debug, Default, Clone)]
pub struct TemplateInterpreter {
    variables: HashMap<String, Value>,
}

enum Segment<'a> {
    Text(&'a str),
    Reference(&'a str),
}

impl TemplateInterpreter {
    pub fn new() -> TemplateInterpreter {
        TemplateInterpreter::default()
    }
}

impl Interpreter for TemplateInterpreter {
    fn set(&mut self, name: &str, value: Value) {
        self.variables.insert(name.to_string(), value);
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    fn clear(&mut self) {
        self.variables.clear();
    }

    fn eval_script(&mut self, script: &str) -> Result<Value> {
        let segments = parse(script)?;

        if let [Segment::Reference(name)] = &segments[..] {
            return Ok(self.get(name).cloned().unwrap_or_default());
        }

        let mut out = String::new();
        for segment in &segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Reference(name) => match self.get(name) {
                    None | Some(Value::Null) => return Ok(Value::Null),
                    Some(Value::List(_)) => {
                        return Err(Error::expression_evaluation_failed(format!(
                            "`{name}` is multi-valued and cannot be interpolated"
                        )))
                    }
                    Some(value) => out.push_str(&value.to_string()),
                },
            }
        }

        Ok(Value::String(out))
    }
}

fn parse(script: &str) -> Result<Vec<Segment<'_>>> {
    let mut segments = vec![];
    let mut rest = script;

    while let Some(start) = rest.find("${") {
        if start > 0 {
            segments.push(Segment::Text(&rest[..start]));
        }

        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            return Err(Error::expression_evaluation_failed(format!(
                "unterminated `${{` in `{script}`"
            )));
        };

        let name = after[..end].trim();
        if name.is_empty() {
            return Err(Error::expression_evaluation_failed(format!(
                "empty reference in `{script}`"
            )));
        }

        segments.push(Segment::Reference(name));
        rest = &after[end + 1..];
    }

    if !rest.is_empty() {
        segments.push(Segment::Text(rest));
    }

    Ok(segments)
}
