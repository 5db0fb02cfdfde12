use bb_storage::StoreError;

use crate::{config::ServerConfig, pool::StorePool};

#[derive(Clone)]
pub struct AppState {
    pub pool: StorePool,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self, StoreError> {
        let pool = StorePool::open(&config.storage_dir, config.pool_size)?;
        Ok(Self { pool })
    }
}
