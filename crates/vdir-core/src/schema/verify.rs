use super::{EntryMapping, Partition, SourceMapping};
use crate::{Error, Result};

use std::collections::HashSet;

impl Partition {
    /// Checks that every mapping references configured sources and fields.
    pub fn verify(&self) -> Result<()> {
        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(&source.name) {
                return Err(Error::invalid_config(format!(
                    "duplicate source `{}`",
                    source.name
                )));
            }
        }

        for entry in &self.entries {
            self.verify_entry(entry)
                .map_err(|err| err.context(err!("entry `{}`", entry.dn)))?;
        }

        Ok(())
    }

    fn verify_entry(&self, entry: &EntryMapping) -> Result<()> {
        let Some(primary) = entry.primary() else {
            return Err(Error::invalid_mapping("entry has no sources"));
        };

        if self.source_config(primary)?.primary_keys().next().is_none() {
            return Err(Error::invalid_mapping(format!(
                "primary source `{}` defines no primary key",
                primary.name
            )));
        }

        for source in &entry.sources {
            self.verify_source_mapping(entry, source)?;
        }

        Ok(())
    }

    fn verify_source_mapping(&self, entry: &EntryMapping, mapping: &SourceMapping) -> Result<()> {
        let config = self.source_config(mapping)?;

        for field in &mapping.fields {
            config.expect_field(&field.name)?;

            let Some((source, name)) = field.foreign_key() else {
                continue;
            };

            let Some(target) = entry.source(source) else {
                return Err(Error::unknown_source(source));
            };

            self.source_config(target)?.expect_field(name)?;
        }

        Ok(())
    }
}
