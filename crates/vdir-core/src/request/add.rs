use super::Attributes;

#[derive(Debug, Clone, PartialEq)]
pub struct AddRequest {
    pub dn: String,
    pub attributes: Attributes,
}

impl AddRequest {
    pub fn new(dn: impl Into<String>, attributes: Attributes) -> AddRequest {
        AddRequest {
            dn: dn.into(),
            attributes,
        }
    }
}
