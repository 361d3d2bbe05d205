pub mod serializer;
pub use serializer::{Flavor, Params, Placeholder, Serializer, TypedValue};
