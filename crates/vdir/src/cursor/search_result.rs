use vdir_core::{
    request::{Attributes, Rdn},
    schema::EntryMapping,
    stmt::{SourceValues, Value},
    Error, Interpreter, Result,
};

/// One entry found by a search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// Primary key of the entry's primary row
    pub key: Vec<Value>,

    /// Values of all rows merged into the entry, keyed by `source.field`
    pub source_values: SourceValues,
}

impl SearchResult {
    /// Evaluates the entry's attribute mappings over the merged source
    /// values. Object classes are reported as `objectClass`.
    pub fn attributes(&self, entry: &EntryMapping, interpreter: &mut dyn Interpreter) -> Result<Attributes> {
        let mut attributes = Attributes::new();

        for object_class in &entry.object_classes {
            attributes.add("objectClass", object_class.as_str());
        }

        interpreter.clear();
        interpreter.set_values(&self.source_values);

        for mapping in &entry.attributes {
            let value = interpreter.eval_attribute(mapping)?;
            if !value.is_null() {
                attributes.add(&mapping.name, value);
            }
        }

        interpreter.clear();
        Ok(attributes)
    }

    /// Evaluates the RDN attributes. Each contributes its first value.
    pub fn rdn(&self, entry: &EntryMapping, interpreter: &mut dyn Interpreter) -> Result<Rdn> {
        let mut rdn = Rdn::new();

        interpreter.clear();
        interpreter.set_values(&self.source_values);

        for mapping in entry.rdn_attributes() {
            let value = interpreter.eval_attribute(mapping)?;
            let Some(value) = value.into_vec().into_iter().next() else {
                interpreter.clear();
                return Err(Error::invalid_mapping(format!(
                    "RDN attribute `{}` has no value",
                    mapping.name
                )));
            };
            rdn.insert(&mapping.name, value);
        }

        interpreter.clear();
        Ok(rdn)
    }
}
