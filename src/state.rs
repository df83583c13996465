use std::sync::Arc;

use tracing::info;

use crate::{
    config::AppConfig,
    foods::seed::seed_default_foods,
    locks::UserLocks,
    store::{MemStore, PgStore, Store},
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
    pub locks: UserLocks,
}

impl AppState {
    /// Builds the configured store and seeds it.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn Store> = match &config.database_url {
            Some(url) => Arc::new(PgStore::connect(url, config.db_max_connections).await?),
            None => {
                info!("DATABASE_URL not set; using in-memory store");
                Arc::new(MemStore::new())
            }
        };

        if config.seed_foods {
            seed_default_foods(store.as_ref()).await?;
        }

        Ok(Self::from_parts(store, Arc::new(config)))
    }

    pub fn from_parts(store: Arc<dyn Store>, config: Arc<AppConfig>) -> Self {
        Self {
            store,
            config,
            locks: UserLocks::new(),
        }
    }

    /// Fresh, unseeded in-memory state.
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::from_parts(Arc::new(MemStore::new()), Arc::new(AppConfig::default()))
    }
}
