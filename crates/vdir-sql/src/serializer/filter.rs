use super::{Column, Delimited, Formatter, Params, ToSql};

use vdir_core::{
    filter::{CompareOp, SimpleFilter, SubstringFilter},
    schema::FieldType,
    stmt::Value,
    Filter,
};

/// A comparison against one bound value.
struct Compare<'a> {
    column: Column<'a>,
    op: CompareOp,
    value: &'a Value,
}

impl ToSql for &Filter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        match self {
            Filter::And(operands) => group(f, operands, " AND "),
            Filter::Or(operands) => group(f, operands, " OR "),
            Filter::Not(operand) => {
                let inner = f.nested(|f| operand.as_ref().to_sql(f));
                if !inner.is_empty() {
                    fmt!(f, "NOT (" inner.as_str() ")");
                }
            }
            Filter::Simple(filter) => filter.to_sql(f),
            Filter::Substring(filter) => filter.to_sql(f),
            Filter::Present(attribute) => {
                let column = f.column(attribute);
                fmt!(f, column " IS NOT NULL");
            }
        }
    }
}

/// Joins the non-empty operands, wrapping them in one pair of parentheses.
fn group<P: Params>(f: &mut Formatter<'_, P>, operands: &[Filter], delimiter: &'static str) {
    let parts: Vec<String> = operands
        .iter()
        .map(|operand| f.nested(|f| operand.to_sql(f)))
        .filter(|part| !part.is_empty())
        .collect();

    if !parts.is_empty() {
        fmt!(f, "(" Delimited(&parts, delimiter) ")");
    }
}

impl ToSql for &SimpleFilter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let column = f.column(&self.attribute);

        match &self.value {
            Value::Null if matches!(self.op, CompareOp::Eq | CompareOp::Approx) => {
                fmt!(f, column " IS NULL");
            }
            Value::List(values) if values.is_empty() => fmt!(f, "1 = 0"),
            Value::List(values) => {
                let parts: Vec<String> = values
                    .iter()
                    .map(|value| {
                        f.nested(|f| {
                            Compare {
                                column: f.column(&self.attribute),
                                op: self.op,
                                value,
                            }
                            .to_sql(f)
                        })
                    })
                    .collect();
                fmt!(f, "(" Delimited(&parts, " OR ") ")");
            }
            value => Compare {
                column,
                op: self.op,
                value,
            }
            .to_sql(f),
        }
    }
}

impl ToSql for &SubstringFilter {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let pattern = Value::String(self.like_pattern());
        Compare {
            column: f.column(&self.attribute),
            op: CompareOp::Like,
            value: &pattern,
        }
        .to_sql(f);
    }
}

impl ToSql for Compare<'_> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        let op = match self.op {
            CompareOp::Eq | CompareOp::Approx => " = ",
            CompareOp::Ge => " >= ",
            CompareOp::Le => " <= ",
            CompareOp::Like => " LIKE ",
        };

        let ty = self.column.config.map(|config| config.ty);
        let lower = self
            .column
            .config
            .is_some_and(|config| config.is_case_insensitive());

        let placeholder = f.params.push(self.value, ty.or_else(|| infer(self.value)));

        if lower {
            fmt!(f, "LOWER(" self.column ")" op "LOWER(" placeholder ")");
        } else {
            fmt!(f, self.column op placeholder);
        }

        if self.op == CompareOp::Like {
            // MySQL string literals treat the backslash as an escape
            let escape = if f.serializer.is_mysql() {
                " ESCAPE '\\\\'"
            } else {
                " ESCAPE '\\'"
            };
            fmt!(f, escape);
        }
    }
}

fn infer(value: &Value) -> Option<FieldType> {
    match value {
        Value::String(_) => Some(FieldType::Varchar),
        Value::I64(_) => Some(FieldType::Bigint),
        Value::Bool(_) => Some(FieldType::Boolean),
        Value::F64(_) => Some(FieldType::Decimal),
        Value::Bytes(_) => Some(FieldType::Binary),
        Value::Null | Value::List(_) => None,
    }
}
