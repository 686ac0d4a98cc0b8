use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{PlaceService, SeaOrmPlaceService, SearchService};

/// Services shared by the HTTP server and the CLI.
#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub search_service: Arc<SearchService>,

    pub place_service: Arc<dyn PlaceService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store).await)
    }

    /// Builds the services on an already migrated store. Probes search
    /// capabilities once.
    pub async fn with_store(config: Config, store: Store) -> Self {
        let search_service =
            Arc::new(SearchService::new(store.conn.clone(), config.search.clone()).await);

        let place_service: Arc<dyn PlaceService> = Arc::new(SeaOrmPlaceService::new(
            store.clone(),
            search_service.clone(),
            config.search.page_size,
        ));

        Self {
            config: Arc::new(config),
            store,
            search_service,
            place_service,
        }
    }
}
