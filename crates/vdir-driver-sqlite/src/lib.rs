mod schema;

mod value;
pub(crate) use value::Value;

use rusqlite::Connection as RusqliteConnection;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use vdir_core::{
    async_trait,
    driver::{Driver, Response, Row},
    schema::{FieldType, Partition},
    stmt::{Select, Statement},
    Error, Result,
};
use vdir_sql::{self as sql, TypedValue};
use url::Url;

#[derive(Debug)]
pub enum Sqlite {
    File(PathBuf),

    /// Every connection opens its own, empty database
    InMemory,
}

impl Sqlite {
    /// Create a new SQLite driver from a `sqlite:` connection URL
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let url_str = url.into();
        let url = Url::parse(&url_str).map_err(Error::driver_operation_failed)?;

        if url.scheme() != "sqlite" {
            return Err(Error::invalid_config(format!(
                "connection URL does not have a `sqlite` scheme; url={url_str}"
            )));
        }

        if url.path() == ":memory:" {
            Ok(Self::InMemory)
        } else {
            Ok(Self::File(PathBuf::from(url.path())))
        }
    }

    /// Create an in-memory SQLite database
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Open a SQLite database at the specified file path
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        Self::File(path.as_ref().to_path_buf())
    }
}

#[async_trait]
impl Driver for Sqlite {
    fn url(&self) -> Cow<'_, str> {
        match self {
            Sqlite::InMemory => Cow::Borrowed("sqlite::memory:"),
            Sqlite::File(path) => Cow::Owned(format!("sqlite:{}", path.display())),
        }
    }

    async fn connect(&self) -> Result<Box<dyn vdir_core::Connection>> {
        let connection = match self {
            Sqlite::File(path) => Connection::open(path)?,
            Sqlite::InMemory => Connection::in_memory()?,
        };
        Ok(Box::new(connection))
    }
}

#[derive(Debug)]
pub struct Connection {
    connection: RusqliteConnection,
}

impl Connection {
    pub fn in_memory() -> Result<Self> {
        let connection =
            RusqliteConnection::open_in_memory().map_err(Error::driver_operation_failed)?;

        Ok(Self { connection })
    }

    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection =
            RusqliteConnection::open(path).map_err(Error::driver_operation_failed)?;
        Ok(Self { connection })
    }

    /// Creates the table of every source in the partition, if missing.
    pub fn push_partition(&mut self, partition: &Partition) -> Result<()> {
        for source in &partition.sources {
            let stmt = schema::create_table(source);
            tracing::debug!(source = %source.name, sql = %stmt, "creating table");

            self.connection
                .execute(&stmt, [])
                .map_err(Error::driver_operation_failed)?;
        }

        Ok(())
    }

    /// Types of the selected columns, in select-list order.
    fn column_types(partition: &Partition, select: &Select) -> Vec<Option<FieldType>> {
        select
            .fields
            .iter()
            .map(|field| {
                let table = select.table(&field.alias)?;
                let source = partition.source(&table.source)?;
                Some(source.field(&field.field)?.ty)
            })
            .collect()
    }
}

#[vdir_core::async_trait]
impl vdir_core::Connection for Connection {
    async fn exec(&mut self, partition: &Partition, stmt: Statement) -> Result<Response> {
        let mut params: Vec<TypedValue> = vec![];
        let sql_str = sql::Serializer::sqlite(partition).serialize(&stmt, &mut params);

        let mut prepared = self
            .connection
            .prepare_cached(&sql_str)
            .map_err(Error::driver_operation_failed)?;

        let params = params.into_iter().map(Value::from).collect::<Vec<_>>();

        let Statement::Select(select) = &stmt else {
            let count = prepared
                .execute(rusqlite::params_from_iter(params.iter()))
                .map_err(Error::driver_operation_failed)?;

            return Ok(Response::count(count as _));
        };

        let tys = Self::column_types(partition, select);

        let mut rows = prepared
            .query(rusqlite::params_from_iter(params.iter()))
            .map_err(Error::driver_operation_failed)?;

        let mut ret: Vec<Row> = vec![];

        loop {
            match rows.next() {
                Ok(Some(row)) => {
                    let mut items = Vec::with_capacity(tys.len());

                    for (index, ty) in tys.iter().enumerate() {
                        items.push(Value::from_sql(row, index, *ty)?.into_inner());
                    }

                    ret.push(items);
                }
                Ok(None) => break,
                Err(err) => {
                    return Err(Error::driver_operation_failed(err));
                }
            }
        }

        Ok(Response::row_stream(ret))
    }
}
