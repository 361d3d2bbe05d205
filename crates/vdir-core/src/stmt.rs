mod assignment;
pub use assignment::Assignment;

mod delete;
pub use delete::Delete;

mod insert;
pub use insert::Insert;

mod select;
pub use select::{FieldRef, Join, JoinType, Select, TableRef};

mod source_values;
pub use source_values::SourceValues;

mod statement;
pub use statement::Statement;

mod update;
pub use update::Update;

mod value;
pub use value::Value;
