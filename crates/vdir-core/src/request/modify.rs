use super::Attribute;

#[derive(Debug, Clone, PartialEq)]
pub struct ModifyRequest {
    pub dn: String,
    pub modifications: Vec<Modification>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Modification {
    pub op: ModificationOp,
    pub attribute: Attribute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModificationOp {
    Add,
    Replace,
    Delete,
}

impl ModifyRequest {
    pub fn new(dn: impl Into<String>) -> ModifyRequest {
        ModifyRequest {
            dn: dn.into(),
            modifications: vec![],
        }
    }

    pub fn modification(mut self, op: ModificationOp, attribute: Attribute) -> ModifyRequest {
        self.modifications.push(Modification { op, attribute });
        self
    }
}
