use super::FieldMapping;

use serde::Deserialize;

/// One backing source of an entry mapping.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceMapping {
    /// Name of the source within the entry. Also its canonical table alias
    /// and the prefix of its keys in source values.
    pub name: String,

    /// Name of the source config. Defaults to `name`.
    #[serde(default)]
    pub source: Option<String>,

    /// Required sources are inner joined, others are left joined.
    #[serde(default = "default_required")]
    pub required: bool,

    pub fields: Vec<FieldMapping>,
}

fn default_required() -> bool {
    true
}

impl SourceMapping {
    pub fn source_name(&self) -> &str {
        self.source.as_deref().unwrap_or(&self.name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldMapping> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn foreign_keys(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.iter().filter(|field| field.is_foreign_key())
    }

    /// Fields whose value is computed from the request rather than copied
    /// from another source.
    pub fn own_fields(&self) -> impl Iterator<Item = &FieldMapping> {
        self.fields.iter().filter(|field| !field.is_foreign_key())
    }
}
