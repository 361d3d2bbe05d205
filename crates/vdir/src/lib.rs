pub mod adapter;
pub use adapter::Adapter;

pub mod cursor;
pub use cursor::{Cursor, SearchResult};

pub mod engine;

pub use vdir_core::{Error, Result};
