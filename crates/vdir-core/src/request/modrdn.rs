use super::Rdn;

#[derive(Debug, Clone, PartialEq)]
pub struct ModRdnRequest {
    pub dn: String,
    pub new_rdn: Rdn,
    pub delete_old_rdn: bool,
}

impl ModRdnRequest {
    pub fn new(dn: impl Into<String>, new_rdn: Rdn) -> ModRdnRequest {
        ModRdnRequest {
            dn: dn.into(),
            new_rdn,
            delete_old_rdn: true,
        }
    }
}
