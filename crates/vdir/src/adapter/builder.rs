use super::{Adapter, Config, InterpreterFactory, Shared, SourceLocks};

use indexmap::IndexMap;
use vdir_core::{
    interpreter::TemplateInterpreter, Driver, Error, Interpreter, Partition, Result,
};
use vdir_sql::Flavor;

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    /// Drivers by connection name
    drivers: IndexMap<String, Box<dyn Driver>>,

    /// Creates the interpreter of each operation. Defaults to
    /// [`TemplateInterpreter`].
    interpreter: Option<Box<InterpreterFactory>>,

    config: Config,
}

impl Builder {
    /// Registers the driver serving the sources of `connection`.
    pub fn driver(&mut self, connection: impl Into<String>, driver: impl Driver) -> &mut Self {
        self.drivers.insert(connection.into(), Box::new(driver));
        self
    }

    pub fn interpreter<F>(&mut self, factory: F) -> &mut Self
    where
        F: Fn() -> Box<dyn Interpreter> + Send + Sync + 'static,
    {
        self.interpreter = Some(Box::new(factory));
        self
    }

    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = config;
        self
    }

    /// Default search size limit, `0` for unlimited
    pub fn size_limit(&mut self, size_limit: usize) -> &mut Self {
        self.config.size_limit = size_limit;
        self
    }

    pub fn locking(&mut self, locking: bool) -> &mut Self {
        self.config.locking = locking;
        self
    }

    pub fn flavor(&mut self, flavor: Flavor) -> &mut Self {
        self.config.flavor = flavor;
        self
    }

    /// Verifies the partition and checks that every connection it uses has
    /// a driver.
    pub fn build(&mut self, partition: Partition) -> Result<Adapter> {
        partition.verify()?;

        for source in &partition.sources {
            if !self.drivers.contains_key(&source.connection) {
                return Err(Error::invalid_config(format!(
                    "source `{}` uses connection `{}`, which has no driver",
                    source.name, source.connection
                )));
            }
        }

        let interpreter = self.interpreter.take().unwrap_or_else(|| {
            Box::new(|| Box::new(TemplateInterpreter::new()) as Box<dyn Interpreter>)
        });

        for (connection, driver) in &self.drivers {
            tracing::debug!(connection = %connection, url = %driver.url(), "registered driver");
        }

        Ok(Adapter {
            shared: Arc::new(Shared {
                partition: Arc::new(partition),
                drivers: std::mem::take(&mut self.drivers),
                interpreter,
                config: self.config,
                locks: SourceLocks::new(),
            }),
        })
    }
}
