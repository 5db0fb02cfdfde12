//! Bounded set of SQLite connections shared by all requests.
//!
//! Checkout waits on a fair semaphore, so waiters are served in arrival order and
//! the queue is unbounded. The connection goes back to the idle list when the
//! guard drops, whether the request succeeded or not.

use std::{
    ops::{Deref, DerefMut},
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use bb_storage::{SqliteStore, StoreError};
use thiserror::Error;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::debug;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("connection pool closed")]
    Closed,

    #[error("connection pool has no idle connection")]
    Drained,

    #[error("store task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

#[derive(Clone)]
pub struct StorePool {
    permits: Arc<Semaphore>,
    idle: Arc<Mutex<Vec<SqliteStore>>>,
    size: usize,
}

impl StorePool {
    pub fn open(storage_dir: impl AsRef<Path>, size: usize) -> Result<Self, StoreError> {
        if size == 0 {
            return Err(StoreError::InvalidInput("pool size must be at least 1"));
        }
        let storage_dir = storage_dir.as_ref();
        let stores = (0..size)
            .map(|_| SqliteStore::open(storage_dir))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            permits: Arc::new(Semaphore::new(size)),
            idle: Arc::new(Mutex::new(stores)),
            size,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn idle_count(&self) -> usize {
        lock(&self.idle).len()
    }

    pub async fn acquire(&self) -> Result<PooledStore, PoolError> {
        let permit = self
            .permits
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| PoolError::Closed)?;
        let store = lock(&self.idle).pop().ok_or(PoolError::Drained)?;
        debug!(idle = self.idle_count(), "connection checked out");

        Ok(PooledStore {
            store: Some(store),
            idle: self.idle.clone(),
            _permit: permit,
        })
    }

    /// Runs `work` on a checked-out connection on the blocking thread pool.
    pub async fn run<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut SqliteStore) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<PoolError> + Send + 'static,
    {
        let mut conn = self.acquire().await?;
        tokio::task::spawn_blocking(move || work(&mut *conn))
            .await
            .map_err(PoolError::from)?
    }
}

fn lock(idle: &Mutex<Vec<SqliteStore>>) -> MutexGuard<'_, Vec<SqliteStore>> {
    idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A checked-out connection. Returned to the pool on drop, before the permit is released.
pub struct PooledStore {
    store: Option<SqliteStore>,
    idle: Arc<Mutex<Vec<SqliteStore>>>,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledStore {
    type Target = SqliteStore;

    fn deref(&self) -> &Self::Target {
        self.store.as_ref().expect("store is present until drop")
    }
}

impl DerefMut for PooledStore {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.store.as_mut().expect("store is present until drop")
    }
}

impl Drop for PooledStore {
    fn drop(&mut self) {
        if let Some(store) = self.store.take() {
            lock(&self.idle).push(store);
        }
    }
}
