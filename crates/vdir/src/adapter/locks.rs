use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

/// Readers/writer locks over backend sources, keyed by
/// `connection.source`.
///
/// Locks are created on first use and live as long as the set. Builders
/// never take them; the adapter does when locking is enabled.
#[derive(Debug, Clone, Default)]
pub struct SourceLocks {
    locks: Arc<Mutex<HashMap<String, Arc<RwLock<()>>>>>,
}

impl SourceLocks {
    pub fn new() -> SourceLocks {
        SourceLocks::default()
    }

    pub async fn lock(&self, connection: &str, source: &str) -> Arc<RwLock<()>> {
        let mut locks = self.locks.lock().await;
        locks
            .entry(format!("{connection}.{source}"))
            .or_default()
            .clone()
    }

    pub async fn read(&self, connection: &str, source: &str) -> OwnedRwLockReadGuard<()> {
        self.lock(connection, source).await.read_owned().await
    }

    pub async fn write(&self, connection: &str, source: &str) -> OwnedRwLockWriteGuard<()> {
        self.lock(connection, source).await.write_owned().await
    }
}
