use crate::stmt::Value;

/// A named, possibly multi-valued directory attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub values: Vec<Value>,
}

/// An ordered attribute set with case-insensitive names.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Attributes {
    attributes: Vec<Attribute>,
}

impl Attribute {
    pub fn new(name: impl Into<String>, values: impl IntoIterator<Item = impl Into<Value>>) -> Attribute {
        Attribute {
            name: name.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }
}

impl Attributes {
    pub fn new() -> Attributes {
        Attributes::default()
    }

    /// Adds values to an attribute, creating it if needed. Duplicate values
    /// are ignored.
    pub fn add(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        let attribute = match self.position(name) {
            Some(index) => &mut self.attributes[index],
            None => {
                self.attributes.push(Attribute {
                    name: name.to_string(),
                    values: vec![],
                });
                let last = self.attributes.len() - 1;
                &mut self.attributes[last]
            }
        };

        for value in value.into_vec() {
            if !attribute.values.contains(&value) {
                attribute.values.push(value);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.position(name).map(|index| &self.attributes[index])
    }

    pub fn values(&self, name: &str) -> &[Value] {
        self.get(name)
            .map(|attribute| attribute.values.as_slice())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name.eq_ignore_ascii_case(name))
    }
}

impl FromIterator<Attribute> for Attributes {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Attributes {
        let mut attributes = Attributes::new();
        for attribute in iter {
            attributes.add(&attribute.name, attribute.values);
        }
        attributes
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}
