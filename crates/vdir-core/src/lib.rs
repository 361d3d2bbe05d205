#[macro_use]
mod error;
pub use error::Error;

pub mod driver;
pub use driver::{Connection, Driver};

pub mod filter;
pub use filter::Filter;

pub mod interpreter;
pub use interpreter::Interpreter;

pub mod request;

pub mod schema;
pub use schema::Partition;

pub mod stmt;

/// A Result type alias that uses vdir's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
