#[derive(Debug, Clone, PartialEq)]
pub struct DeleteRequest {
    pub dn: String,
}

impl DeleteRequest {
    pub fn new(dn: impl Into<String>) -> DeleteRequest {
        DeleteRequest { dn: dn.into() }
    }
}
