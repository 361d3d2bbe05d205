use super::{EntryMapping, SourceConfig, SourceMapping};
use crate::{Error, Result};

use serde::Deserialize;

/// A set of backend sources and the entries mapped onto them.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Partition {
    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub entries: Vec<EntryMapping>,
}

impl Partition {
    /// Loads and verifies a partition from its JSON form.
    pub fn from_json(json: &str) -> Result<Partition> {
        let partition: Partition = serde_json::from_str(json)?;
        partition.verify()?;
        tracing::debug!(
            sources = partition.sources.len(),
            entries = partition.entries.len(),
            "loaded partition"
        );
        Ok(partition)
    }

    pub fn source(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|source| source.name == name)
    }

    /// Resolves the source config backing a source mapping.
    pub fn source_config(&self, mapping: &SourceMapping) -> Result<&SourceConfig> {
        self.source(mapping.source_name())
            .ok_or_else(|| Error::unknown_source(mapping.source_name()))
    }

    /// Finds an entry mapping by DN, ignoring case.
    pub fn entry(&self, dn: &str) -> Option<&EntryMapping> {
        self.entries
            .iter()
            .find(|entry| entry.dn.eq_ignore_ascii_case(dn))
    }
}
