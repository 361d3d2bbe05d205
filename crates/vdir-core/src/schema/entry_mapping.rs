use super::{MappingValue, SourceMapping};

use serde::Deserialize;

/// A virtual entry type defined in terms of backend sources.
///
/// The first source mapping is the primary source: its rows determine the
/// entry's identity. Every other source mapping is secondary and contributes
/// zero or more dependent rows per primary row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryMapping {
    /// Distinguished name pattern of the entries, e.g. `uid=...,ou=users`.
    pub dn: String,

    #[serde(default)]
    pub object_classes: Vec<String>,

    #[serde(default)]
    pub attributes: Vec<AttributeMapping>,

    pub sources: Vec<SourceMapping>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AttributeMapping {
    pub name: String,

    /// Attributes flagged `rdn` make up the entry's relative distinguished
    /// name.
    #[serde(default)]
    pub rdn: bool,

    #[serde(flatten)]
    pub value: MappingValue,
}

impl EntryMapping {
    pub fn primary(&self) -> Option<&SourceMapping> {
        self.sources.first()
    }

    pub fn secondaries(&self) -> &[SourceMapping] {
        self.sources.get(1..).unwrap_or_default()
    }

    pub fn source(&self, name: &str) -> Option<&SourceMapping> {
        self.sources.iter().find(|source| source.name == name)
    }

    /// Attribute names are case-insensitive.
    pub fn attribute(&self, name: &str) -> Option<&AttributeMapping> {
        self.attributes
            .iter()
            .find(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }

    pub fn rdn_attributes(&self) -> impl Iterator<Item = &AttributeMapping> {
        self.attributes.iter().filter(|attribute| attribute.rdn)
    }
}

impl AttributeMapping {
    pub fn new(name: impl Into<String>, value: MappingValue) -> AttributeMapping {
        AttributeMapping {
            name: name.into(),
            rdn: false,
            value,
        }
    }

    pub fn variable(&self) -> Option<&str> {
        self.value.variable()
    }
}
