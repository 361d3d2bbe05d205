mod entry_mapping;
pub use entry_mapping::{AttributeMapping, EntryMapping};

mod field;
pub use field::{FieldConfig, FieldType};

mod field_mapping;
pub use field_mapping::{Expression, FieldMapping, MappingValue};

mod partition;
pub use partition::Partition;

mod source;
pub use source::SourceConfig;

mod source_mapping;
pub use source_mapping::SourceMapping;

mod verify;
