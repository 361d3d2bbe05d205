use rusqlite::{
    types::{ToSql, ToSqlOutput, Value as SqlValue, ValueRef},
    Row,
};
use vdir_core::{
    schema::FieldType,
    stmt::Value as CoreValue,
    Error, Result,
};
use vdir_sql::TypedValue;

#[derive(Debug)]
pub struct Value {
    value: CoreValue,

    /// Type of the field the value is bound against
    ty: Option<FieldType>,
}

impl From<TypedValue> for Value {
    fn from(value: TypedValue) -> Self {
        Self {
            value: value.value,
            ty: value.ty,
        }
    }
}

impl Value {
    /// Converts this SQLite driver value into the core value.
    pub fn into_inner(self) -> CoreValue {
        self.value
    }

    /// Converts a SQLite value within a row to a core value.
    pub fn from_sql(row: &Row, index: usize, ty: Option<FieldType>) -> Result<Self> {
        let value: SqlValue = row.get(index).map_err(Error::driver_operation_failed)?;

        let value = match value {
            SqlValue::Null => CoreValue::Null,
            SqlValue::Integer(value) => match ty {
                Some(FieldType::Boolean) => CoreValue::Bool(value != 0),
                _ => CoreValue::I64(value),
            },
            SqlValue::Real(value) => CoreValue::F64(value),
            SqlValue::Text(value) => CoreValue::String(value),
            SqlValue::Blob(value) => CoreValue::Bytes(value),
        };

        Ok(Value { value, ty })
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match &self.value {
            CoreValue::Bool(true) => Ok(ToSqlOutput::Owned(SqlValue::Integer(1))),
            CoreValue::Bool(false) => Ok(ToSqlOutput::Owned(SqlValue::Integer(0))),
            CoreValue::I64(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(*v))),
            CoreValue::F64(v) => Ok(ToSqlOutput::Owned(SqlValue::Real(*v))),
            // Directory values arrive as strings; integer columns get numbers
            CoreValue::String(v) if self.ty.is_some_and(FieldType::is_integer) => {
                match v.trim().parse::<i64>() {
                    Ok(v) => Ok(ToSqlOutput::Owned(SqlValue::Integer(v))),
                    Err(_) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
                }
            }
            CoreValue::String(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Text(v.as_bytes()))),
            CoreValue::Bytes(v) => Ok(ToSqlOutput::Borrowed(ValueRef::Blob(&v[..]))),
            CoreValue::Null => Ok(ToSqlOutput::Owned(SqlValue::Null)),
            CoreValue::List(_) => Err(rusqlite::Error::ToSqlConversionFailure(
                format!("cannot bind a multi-valued value; value={:?}", self.value).into(),
            )),
        }
    }
}
