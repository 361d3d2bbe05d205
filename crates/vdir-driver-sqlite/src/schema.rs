use vdir_core::schema::{FieldType, SourceConfig};

/// `CREATE TABLE IF NOT EXISTS` for a source, keyed by its primary-key
/// fields.
pub(crate) fn create_table(source: &SourceConfig) -> String {
    let mut columns: Vec<String> = source
        .fields
        .iter()
        .map(|field| format!("{} {}", quote(field.column_name()), storage_ty(field.ty)))
        .collect();

    let pk: Vec<String> = source
        .primary_keys()
        .map(|field| quote(field.column_name()))
        .collect();

    if !pk.is_empty() {
        columns.push(format!("PRIMARY KEY ({})", pk.join(", ")));
    }

    let table: Vec<String> = source.table_name().map(quote).collect();

    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table.join("."),
        columns.join(", ")
    )
}

fn storage_ty(ty: FieldType) -> &'static str {
    match ty {
        FieldType::Integer | FieldType::Bigint | FieldType::Boolean => "INTEGER",
        FieldType::Decimal => "REAL",
        FieldType::Binary => "BLOB",
        FieldType::Varchar
        | FieldType::Char
        | FieldType::Text
        | FieldType::Date
        | FieldType::Timestamp => "TEXT",
    }
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
