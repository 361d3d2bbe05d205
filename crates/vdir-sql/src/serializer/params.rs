use super::{Flavor, Formatter, ToSql};

use vdir_core::{schema::FieldType, stmt::Value};

/// Receives bound values in placeholder order.
pub trait Params {
    /// Binds `value`; `ty` is the type of the field it is compared with or
    /// assigned to, when known.
    fn push(&mut self, value: &Value, ty: Option<FieldType>) -> Placeholder;
}

/// 1-based position of a bound value.
pub struct Placeholder(pub usize);

/// A bound value together with the type of its target field.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedValue {
    pub value: Value,
    pub ty: Option<FieldType>,
}

impl Params for Vec<Value> {
    fn push(&mut self, value: &Value, _ty: Option<FieldType>) -> Placeholder {
        self.push(value.clone());
        Placeholder(self.len())
    }
}

impl Params for Vec<TypedValue> {
    fn push(&mut self, value: &Value, ty: Option<FieldType>) -> Placeholder {
        self.push(TypedValue {
            value: value.clone(),
            ty,
        });
        Placeholder(self.len())
    }
}

impl ToSql for Placeholder {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) {
        use std::fmt::Write;

        // Writing to a String cannot fail
        let _ = match f.serializer.flavor {
            Flavor::Generic | Flavor::Mysql => write!(&mut f.dst, "?"),
            Flavor::Postgresql => write!(&mut f.dst, "${}", self.0),
            Flavor::Sqlite => write!(&mut f.dst, "?{}", self.0),
        };
    }
}
