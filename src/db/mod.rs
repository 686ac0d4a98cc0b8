use crate::domain::{PlaceId, UserId};
use crate::models::place::{NewPlace, Place};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use repositories::place::{PlaceScope, format_timestamp};

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if db_url.starts_with("sqlite:") && !db_url.contains(":memory:") {
            let path_str = db_url
                .trim_start_matches("sqlite:")
                .trim_start_matches("//")
                .split('?')
                .next()
                .unwrap_or_default();
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            backend = ?conn.get_database_backend(),
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn place_repo(&self) -> repositories::place::PlaceRepository {
        repositories::place::PlaceRepository::new(self.conn.clone())
    }

    pub async fn add_place(&self, author: UserId, place: &NewPlace) -> Result<Place> {
        self.place_repo().insert(author, place, Utc::now()).await
    }

    /// Inserts with an explicit creation time, for imports and seeding.
    pub async fn add_place_at(
        &self,
        author: UserId,
        place: &NewPlace,
        created_at: DateTime<Utc>,
    ) -> Result<Place> {
        self.place_repo().insert(author, place, created_at).await
    }

    pub async fn get_place(&self, id: PlaceId) -> Result<Option<Place>> {
        self.place_repo().get(id).await
    }

    pub async fn list_places(
        &self,
        scope: PlaceScope,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Place>, u64)> {
        self.place_repo().list(scope, page, per_page).await
    }

    pub async fn soft_delete_place(&self, id: PlaceId) -> Result<bool> {
        self.place_repo().soft_delete(id, Utc::now()).await
    }

    pub async fn restore_place(&self, id: PlaceId) -> Result<bool> {
        self.place_repo().restore(id, Utc::now()).await
    }
}
