use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, Statement};
use std::sync::Arc;
use tracing::{info, warn};

use super::predicate::{FULL_ADDRESS_COLUMN, MatchFields};
use super::strategy::{FuzzyRankedStrategy, PlainOrderedStrategy, SearchStrategy};

const PG_TRGM_PROBE: &str = "SELECT 1 FROM pg_extension WHERE extname = 'pg_trgm'";

/// What the connected store can do for text search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreCapabilities {
    pub backend: DbBackend,
    /// `similarity()` is available for ranking.
    pub similarity: bool,
    /// `places.full_address_cached` exists.
    pub cached_address: bool,
}

impl StoreCapabilities {
    #[must_use]
    pub const fn plain(backend: DbBackend) -> Self {
        Self {
            backend,
            similarity: false,
            cached_address: false,
        }
    }

    /// Inspects the store once. A failed probe counts as "unsupported".
    pub async fn probe(conn: &DatabaseConnection, allow_similarity: bool) -> Self {
        let backend = conn.get_database_backend();

        let similarity = allow_similarity
            && backend == DbBackend::Postgres
            && probe_exists(conn, "pg_trgm", PG_TRGM_PROBE).await;

        let cached_address = probe_exists(conn, "full_address_cached", &column_probe(backend)).await;

        let capabilities = Self {
            backend,
            similarity,
            cached_address,
        };
        info!(
            backend = ?backend,
            similarity,
            cached_address,
            "Search capabilities detected"
        );
        capabilities
    }

    #[must_use]
    pub fn strategy(&self) -> Arc<dyn SearchStrategy> {
        let fields = MatchFields::new(self.backend, self.cached_address);
        if self.similarity {
            Arc::new(FuzzyRankedStrategy::new(fields))
        } else {
            Arc::new(PlainOrderedStrategy::new(fields))
        }
    }
}

fn column_probe(backend: DbBackend) -> String {
    match backend {
        DbBackend::Postgres => format!(
            "SELECT 1 FROM information_schema.columns WHERE table_schema = current_schema() \
             AND table_name = 'places' AND column_name = '{FULL_ADDRESS_COLUMN}'"
        ),
        DbBackend::MySql => format!(
            "SELECT 1 FROM information_schema.columns WHERE table_schema = DATABASE() \
             AND table_name = 'places' AND column_name = '{FULL_ADDRESS_COLUMN}'"
        ),
        _ => format!(
            "SELECT 1 FROM pragma_table_info('places') WHERE name = '{FULL_ADDRESS_COLUMN}'"
        ),
    }
}

async fn probe_exists(conn: &DatabaseConnection, probe: &str, sql: &str) -> bool {
    let backend = conn.get_database_backend();
    match conn
        .query_one(Statement::from_string(backend, sql.to_string()))
        .await
    {
        Ok(row) => row.is_some(),
        Err(e) => {
            warn!(probe, error = %e, "Capability probe failed, assuming unsupported");
            false
        }
    }
}
