use std::{
    borrow::Cow,
    sync::{Arc, Mutex},
};
use vdir_core::{
    async_trait,
    driver::{Connection, Driver, Response},
    stmt::{Statement, Value},
    Partition, Result,
};
use vdir_sql::Serializer;

#[derive(Debug)]
pub struct LoggingDriver {
    inner: Box<dyn Driver>,

    /// Log of all statements executed through this driver
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

impl LoggingDriver {
    pub fn new(driver: impl Driver) -> Self {
        Self {
            inner: Box::new(driver),
            ops_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a handle to access the operations log
    pub fn ops_log_handle(&self) -> Arc<Mutex<Vec<DriverOp>>> {
        self.ops_log.clone()
    }
}

#[async_trait]
impl Driver for LoggingDriver {
    fn url(&self) -> Cow<'_, str> {
        self.inner.url()
    }

    async fn connect(&self) -> Result<Box<dyn Connection>> {
        Ok(Box::new(LoggingConnection {
            inner: self.inner.connect().await?,
            ops_log: self.ops_log_handle(),
        }))
    }
}

#[derive(Debug)]
pub struct DriverOp {
    pub statement: Statement,

    /// The statement as sent to SQLite
    pub sql: String,

    pub response: Response,
}

/// A connection wrapper that logs every statement and its response
#[derive(Debug)]
pub struct LoggingConnection {
    inner: Box<dyn Connection>,
    ops_log: Arc<Mutex<Vec<DriverOp>>>,
}

#[async_trait]
impl Connection for LoggingConnection {
    async fn exec(&mut self, partition: &Partition, stmt: Statement) -> Result<Response> {
        let statement = stmt.clone();
        let sql = Serializer::sqlite(partition).serialize(&stmt, &mut Vec::<Value>::new());

        let mut response = self.inner.exec(partition, stmt).await?;

        // Buffer any row stream so both the caller and the log can read it
        let rows = response.rows.dup().await?;

        self.ops_log
            .lock()
            .expect("Failed to acquire ops log lock")
            .push(DriverOp {
                statement,
                sql,
                response: Response { rows },
            });

        Ok(response)
    }
}
