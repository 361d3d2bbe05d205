//! Directory-level requests handed to the builders.

mod add;
pub use add::AddRequest;

mod attribute;
pub use attribute::{Attribute, Attributes};

mod delete;
pub use delete::DeleteRequest;

mod modify;
pub use modify::{Modification, ModificationOp, ModifyRequest};

mod modrdn;
pub use modrdn::ModRdnRequest;

mod rdn;
pub use rdn::Rdn;

mod search;
pub use search::SearchRequest;
