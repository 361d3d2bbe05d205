use super::FieldConfig;
use crate::{Error, Result};

use serde::Deserialize;

/// A backend table and the connection it lives on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    pub name: String,

    /// Name of the connection (driver) the table is reached through.
    pub connection: String,

    /// Physical table name. Defaults to `name`.
    #[serde(default)]
    pub table: Option<String>,

    #[serde(default)]
    pub catalog: Option<String>,

    #[serde(default)]
    pub schema: Option<String>,

    /// Raw SQL predicate always applied when the source is searched.
    #[serde(default)]
    pub filter: Option<String>,

    pub fields: Vec<FieldConfig>,
}

impl SourceConfig {
    /// The `[catalog.][schema.]table` name parts.
    pub fn table_name(&self) -> impl Iterator<Item = &str> {
        self.catalog
            .as_deref()
            .into_iter()
            .chain(self.schema.as_deref())
            .chain(Some(self.table.as_deref().unwrap_or(&self.name)))
    }

    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Like [`SourceConfig::field`], failing with a mapping error.
    pub fn expect_field(&self, name: &str) -> Result<&FieldConfig> {
        self.field(name)
            .ok_or_else(|| Error::unknown_field(&self.name, name))
    }

    pub fn primary_keys(&self) -> impl Iterator<Item = &FieldConfig> {
        self.fields.iter().filter(|field| field.primary_key)
    }
}
