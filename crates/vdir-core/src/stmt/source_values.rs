use super::Value;

use indexmap::IndexMap;

/// Resolved state of an entry's backing rows.
///
/// Keys are `source.field` (or `primaryKey.name`, `rdn.name`); each key
/// holds a set of distinct, non-null values in insertion order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct SourceValues {
    values: IndexMap<String, Vec<Value>>,
}

impl SourceValues {
    pub fn new() -> SourceValues {
        SourceValues::default()
    }

    /// Adds a value under `name`. Lists are flattened, nulls and duplicates
    /// are ignored.
    pub fn add(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let value = value.into();
        if value.is_null() {
            return;
        }

        let values = self.values.entry(name.into()).or_default();
        for value in value.into_vec() {
            if !value.is_null() && !values.contains(&value) {
                values.push(value);
            }
        }
    }

    /// Replaces all values under `name`.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        let name = name.into();
        self.values.shift_remove(&name);
        self.add(name, value);
    }

    pub fn get(&self, name: &str) -> &[Value] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn get_one(&self, name: &str) -> Option<&Value> {
        self.get(name).first()
    }

    pub fn contains(&self, name: &str) -> bool {
        !self.get(name).is_empty()
    }

    pub fn remove(&mut self, name: &str) -> Option<Vec<Value>> {
        self.values.shift_remove(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.values
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Values of one source, keyed by bare field name.
    pub fn source<'a>(&'a self, source: &'a str) -> impl Iterator<Item = (&'a str, &'a [Value])> {
        self.iter().filter_map(move |(name, values)| {
            let (prefix, field) = name.split_once('.')?;
            (prefix == source).then_some((field, values))
        })
    }

    /// Distinct source prefixes, in order of first appearance.
    pub fn sources(&self) -> Vec<&str> {
        let mut sources: Vec<&str> = vec![];
        for (name, _) in self.iter() {
            if let Some((prefix, _)) = name.split_once('.') {
                if !sources.contains(&prefix) {
                    sources.push(prefix);
                }
            }
        }
        sources
    }

    /// Unions `other` into `self`.
    pub fn merge(&mut self, other: &SourceValues) {
        for (name, values) in other.iter() {
            for value in values {
                self.add(name, value.clone());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K, V> FromIterator<(K, V)> for SourceValues
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> SourceValues {
        let mut values = SourceValues::new();
        for (name, value) in iter {
            values.add(name, value);
        }
        values
    }
}
