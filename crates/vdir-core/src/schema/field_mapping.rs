use serde::Deserialize;

/// How the value of a field (or attribute) is derived.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingValue {
    /// A fixed value.
    Constant(String),

    /// A direct reference to an attribute, or to another source's field as
    /// `source.field`.
    Variable(String),

    /// A script run through the interpreter.
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Expression {
    /// Multi-valued variable to iterate. The script runs once per value with
    /// the value bound to `var`.
    #[serde(default)]
    pub foreach: Option<String>,

    #[serde(default)]
    pub var: Option<String>,

    pub script: String,
}

/// Maps one physical field of a source to its value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FieldMapping {
    /// Name of the field in the source config.
    pub name: String,

    #[serde(flatten)]
    pub value: MappingValue,
}

impl MappingValue {
    pub fn variable(&self) -> Option<&str> {
        match self {
            MappingValue::Variable(variable) => Some(variable),
            _ => None,
        }
    }

    pub fn expression(&self) -> Option<&Expression> {
        match self {
            MappingValue::Expression(expression) => Some(expression),
            _ => None,
        }
    }

    /// The variable this value is driven by: the direct variable, or the
    /// `foreach` variable of an expression.
    pub fn driving_variable(&self) -> Option<&str> {
        match self {
            MappingValue::Variable(variable) => Some(variable),
            MappingValue::Expression(expression) => expression.foreach.as_deref(),
            MappingValue::Constant(_) => None,
        }
    }

    /// Whether `attribute` drives this value. `rdn.name` and
    /// `primaryKey.name` name the attribute `name`.
    pub fn is_driven_by(&self, attribute: &str) -> bool {
        self.driving_variable().is_some_and(|variable| {
            let variable = variable
                .strip_prefix("rdn.")
                .or_else(|| variable.strip_prefix("primaryKey."))
                .unwrap_or(variable);
            variable.eq_ignore_ascii_case(attribute)
        })
    }
}

impl Expression {
    pub fn new(script: impl Into<String>) -> Expression {
        Expression {
            foreach: None,
            var: None,
            script: script.into(),
        }
    }

    pub fn foreach(foreach: impl Into<String>, var: impl Into<String>, script: impl Into<String>) -> Expression {
        Expression {
            foreach: Some(foreach.into()),
            var: Some(var.into()),
            script: script.into(),
        }
    }
}

impl FieldMapping {
    pub fn new(name: impl Into<String>, value: MappingValue) -> FieldMapping {
        FieldMapping {
            name: name.into(),
            value,
        }
    }

    pub fn variable(&self) -> Option<&str> {
        self.value.variable()
    }

    /// Foreign-key fields reference another source's already resolved value
    /// as `source.field`.
    pub fn is_foreign_key(&self) -> bool {
        self.foreign_key().is_some()
    }

    /// The `(source, field)` pair a foreign-key field refers to.
    ///
    /// `rdn.` and `primaryKey.` qualified variables name attributes, not
    /// sources.
    pub fn foreign_key(&self) -> Option<(&str, &str)> {
        let (source, field) = self.variable()?.split_once('.')?;
        match source {
            "rdn" | "primaryKey" => None,
            _ => Some((source, field)),
        }
    }
}
