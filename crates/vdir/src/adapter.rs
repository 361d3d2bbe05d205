mod builder;
pub use builder::Builder;

mod config;
pub use config::Config;

mod locks;
pub use locks::SourceLocks;

use crate::{
    cursor::{Cursor, Merge},
    engine::{AddBuilder, Context, DeleteBuilder, ModRdnBuilder, ModifyBuilder, SearchBuilder},
};

use indexmap::{map::Entry, IndexMap};
use tracing::Instrument;
use vdir_core::{
    err,
    request::{AddRequest, DeleteRequest, ModRdnRequest, ModifyRequest, SearchRequest},
    schema::{EntryMapping, SourceMapping},
    stmt::{SourceValues, Statement, Value},
    Connection, Driver, Error, Filter, Interpreter, Partition, Result,
};
use vdir_sql::{Flavor, Serializer};

use std::{fmt, sync::Arc};

/// Creates the interpreter used by one directory operation.
pub type InterpreterFactory = dyn Fn() -> Box<dyn Interpreter> + Send + Sync;

/// Dispatches directory operations to the statement builders and executes
/// the statements they produce.
///
/// Statements of one operation run strictly in order, on one connection per
/// connection name. A failing statement aborts the operation; statements
/// already executed are not rolled back.
#[derive(Clone)]
pub struct Adapter {
    shared: Arc<Shared>,
}

struct Shared {
    partition: Arc<Partition>,
    drivers: IndexMap<String, Box<dyn Driver>>,
    interpreter: Box<InterpreterFactory>,
    config: Config,
    locks: SourceLocks,
}

/// Outcome of a mutation.
#[derive(Debug)]
pub struct ExecResponse {
    /// The executed statements, in execution order
    pub statements: Vec<Statement>,

    /// Rows affected, summed over all statements
    pub count: u64,
}

/// Renders a statement as SQL only when the log line is emitted.
struct Sql<'a> {
    partition: &'a Partition,
    flavor: Flavor,
    stmt: &'a Statement,
}

impl Adapter {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub fn partition(&self) -> &Partition {
        &self.shared.partition
    }

    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    pub fn locks(&self) -> &SourceLocks {
        &self.shared.locks
    }

    pub async fn add(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        request: &AddRequest,
    ) -> Result<ExecResponse> {
        let span = tracing::debug_span!("add", dn = %request.dn);

        async {
            let statements = {
                let mut interpreter = self.interpreter();
                AddBuilder::new(self.context(entry, sources, source_values), &mut *interpreter)
                    .generate(request)?
            };
            self.exec(sources, statements).await
        }
        .instrument(span)
        .await
    }

    pub async fn delete(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        request: &DeleteRequest,
    ) -> Result<ExecResponse> {
        let span = tracing::debug_span!("delete", dn = %request.dn);

        async {
            let statements =
                DeleteBuilder::new(self.context(entry, sources, source_values)).generate(request)?;
            self.exec(sources, statements).await
        }
        .instrument(span)
        .await
    }

    pub async fn modify(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        request: &ModifyRequest,
    ) -> Result<ExecResponse> {
        let span = tracing::debug_span!("modify", dn = %request.dn);

        async {
            let statements = {
                let mut interpreter = self.interpreter();
                ModifyBuilder::new(self.context(entry, sources, source_values), &mut *interpreter)
                    .generate(request)?
            };
            self.exec(sources, statements).await
        }
        .instrument(span)
        .await
    }

    pub async fn modrdn(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        request: &ModRdnRequest,
    ) -> Result<ExecResponse> {
        let span = tracing::debug_span!("modrdn", dn = %request.dn, new_rdn = %request.new_rdn);

        async {
            let statements = {
                let mut interpreter = self.interpreter();
                ModRdnBuilder::new(self.context(entry, sources, source_values), &mut *interpreter)
                    .generate(request)?
            };
            self.exec(sources, statements).await
        }
        .instrument(span)
        .await
    }

    /// Runs a search, returning a cursor over the merged entries.
    pub async fn search(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        request: &SearchRequest,
    ) -> Result<Cursor> {
        let filter = request
            .filter
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default();
        let span = tracing::debug_span!("search", dn = %entry.dn, %filter);

        async {
            let cx = self.context(entry, sources, source_values);
            let (primary, _) = cx.split()?;

            let select = {
                let mut interpreter = self.interpreter();
                SearchBuilder::new(cx, &mut *interpreter).generate(request)?
            };

            // The entry key is the primary source's primary key
            let primary_config = cx.config(primary)?;
            let key = primary_config
                .primary_keys()
                .filter_map(|pk| {
                    select
                        .fields
                        .iter()
                        .position(|field| field.alias == primary.name && field.field == pk.name)
                })
                .collect();
            let columns = select.fields.iter().map(ToString::to_string).collect();

            let guards = if self.shared.config.locking {
                let mut guards = vec![];
                for (connection, source) in self.lock_keys(sources)? {
                    guards.push(self.shared.locks.read(&connection, &source).await);
                }
                guards
            } else {
                vec![]
            };

            let stmt = Statement::from(select);
            let mut connection = self.connect(&primary_config.connection).await?;
            tracing::debug!(sql = %self.sql(&stmt), "executing query");

            let rows = connection
                .exec(&self.shared.partition, stmt)
                .await
                .inspect_err(|err| tracing::warn!(error = %err, "query failed"))?
                .rows
                .into_values()?;

            let limit = self.shared.config.size_limit(request.size_limit);
            Ok(Cursor::new(
                rows,
                Merge::new(columns, key),
                limit,
                (connection, guards),
            ))
        }
        .instrument(span)
        .await
    }

    /// Checks whether the entry identified by `source_values` holds
    /// `attribute=value`.
    pub async fn compare(
        &self,
        entry: &EntryMapping,
        sources: &[SourceMapping],
        source_values: &SourceValues,
        attribute: &str,
        value: impl Into<Value>,
    ) -> Result<bool> {
        let request = SearchRequest::new(Some(Filter::eq(attribute, value)));
        let mut cursor = self.search(entry, sources, source_values, &request).await?;

        Ok(cursor.next().await.transpose()?.is_some())
    }

    fn context<'a>(
        &'a self,
        entry: &'a EntryMapping,
        sources: &'a [SourceMapping],
        source_values: &'a SourceValues,
    ) -> Context<'a> {
        Context::new(&self.shared.partition, entry, sources, source_values)
    }

    fn interpreter(&self) -> Box<dyn Interpreter> {
        (self.shared.interpreter)()
    }

    async fn connect(&self, connection: &str) -> Result<Box<dyn Connection>> {
        let Some(driver) = self.shared.drivers.get(connection) else {
            return Err(Error::invalid_config(format!(
                "no driver for connection `{connection}`"
            )));
        };
        driver.connect().await
    }

    /// Executes mutation statements in order.
    async fn exec(&self, sources: &[SourceMapping], statements: Vec<Statement>) -> Result<ExecResponse> {
        let mut guards = vec![];
        if self.shared.config.locking {
            for (connection, source) in self.lock_keys(sources)? {
                guards.push(self.shared.locks.write(&connection, &source).await);
            }
        }

        let mut connections = IndexMap::<String, Box<dyn Connection>>::new();
        let mut count = 0;
        let total = statements.len();

        for (index, stmt) in statements.iter().enumerate() {
            let source = stmt.source().unwrap_or_default();
            let Some(config) = self.shared.partition.source(source) else {
                return Err(Error::unknown_source(source));
            };

            let connection = match connections.entry(config.connection.clone()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => {
                    let connection = self.connect(entry.key()).await?;
                    entry.insert(connection)
                }
            };

            tracing::debug!(source = %source, sql = %self.sql(stmt), "executing statement");

            let response = connection
                .exec(&self.shared.partition, stmt.clone())
                .await
                .map_err(|err| {
                    tracing::warn!(source = %source, error = %err, "statement failed");
                    err.context(err!(
                        "statement {} of {total} on source `{source}`",
                        index + 1
                    ))
                })?;

            count += response.rows.count();
        }

        Ok(ExecResponse { statements, count })
    }

    /// `(connection, source)` pairs of the sources, sorted so locks are
    /// always taken in the same order.
    fn lock_keys(&self, sources: &[SourceMapping]) -> Result<Vec<(String, String)>> {
        let mut keys = vec![];
        for source in sources {
            let config = self.shared.partition.source_config(source)?;
            keys.push((config.connection.clone(), config.name.clone()));
        }
        keys.sort();
        keys.dedup();
        Ok(keys)
    }

    fn sql<'a>(&'a self, stmt: &'a Statement) -> Sql<'a> {
        Sql {
            partition: &self.shared.partition,
            flavor: self.shared.config.flavor,
            stmt,
        }
    }
}

impl fmt::Debug for Adapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("drivers", &self.shared.drivers)
            .field("config", &self.shared.config)
            .finish()
    }
}

impl fmt::Display for Sql<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut params = Vec::<Value>::new();
        let sql = Serializer::new(self.partition, self.flavor).serialize(self.stmt, &mut params);
        write!(f, "{sql} ({} params)", params.len())
    }
}
