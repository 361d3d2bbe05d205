mod response;
pub use response::{Response, Rows};

mod row_stream;
pub use row_stream::{Row, RowStream};

use crate::{async_trait, schema::Partition, stmt::Statement, Result};

use std::{borrow::Cow, fmt::Debug};

/// A backend the adapter can open connections to.
#[async_trait]
pub trait Driver: Debug + Send + Sync + 'static {
    /// Returns the URL this driver connects to.
    fn url(&self) -> Cow<'_, str>;

    /// Opens a new connection.
    async fn connect(&self) -> Result<Box<dyn Connection>>;
}

/// A borrowed backend connection.
///
/// Statements are executed one at a time, in the order they are submitted.
#[async_trait]
pub trait Connection: Debug + Send + 'static {
    /// Executes a statement. Mutations answer with [`Rows::Count`], queries
    /// with [`Rows::Values`] whose columns follow the select list.
    async fn exec(&mut self, partition: &Partition, stmt: Statement) -> Result<Response>;
}
