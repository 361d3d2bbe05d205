use serde::Deserialize;

/// Physical column of a backend source.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    /// Name the field is referred to by in mappings.
    pub name: String,

    /// Physical column name. Defaults to `name`.
    #[serde(default)]
    pub column: Option<String>,

    #[serde(default)]
    pub primary_key: bool,

    /// Character fields that are not case sensitive are compared through
    /// `LOWER()` on both sides.
    #[serde(default)]
    pub case_sensitive: bool,

    #[serde(default, rename = "type")]
    pub ty: FieldType,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FieldType {
    #[default]
    Varchar,
    Char,
    Text,
    Integer,
    Bigint,
    Decimal,
    Boolean,
    Date,
    Timestamp,
    Binary,
}

impl FieldConfig {
    pub fn new(name: impl Into<String>) -> FieldConfig {
        FieldConfig {
            name: name.into(),
            column: None,
            primary_key: false,
            case_sensitive: false,
            ty: FieldType::default(),
        }
    }

    /// The physical column name.
    pub fn column_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }

    /// Returns `true` if comparisons against this field must ignore case.
    pub fn is_case_insensitive(&self) -> bool {
        !self.case_sensitive && self.ty.is_character()
    }
}

impl FieldType {
    pub fn is_character(self) -> bool {
        matches!(self, FieldType::Varchar | FieldType::Char | FieldType::Text)
    }

    pub fn is_integer(self) -> bool {
        matches!(self, FieldType::Integer | FieldType::Bigint)
    }
}
