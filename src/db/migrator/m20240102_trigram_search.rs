//! PostgreSQL-only search support: the `pg_trgm` extension, a stored
//! `full_address_cached` column and trigram indexes. Other backends skip it.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend, Statement};

use crate::constants::places::FULL_ADDRESS_SQL;

const TRIGRAM_INDEXES: &[(&str, &str)] = &[
    ("idx_places_name_trgm", "lower(name)"),
    ("idx_places_city_trgm", "lower(city)"),
    ("idx_places_full_address_trgm", "lower(full_address_cached)"),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();

        db.execute_unprepared(&format!(
            "ALTER TABLE places ADD COLUMN IF NOT EXISTS full_address_cached text \
             GENERATED ALWAYS AS ({FULL_ADDRESS_SQL}) STORED"
        ))
        .await?;

        // Creating an extension needs elevated privileges on managed databases.
        // The exception block keeps a refusal from aborting the migration
        // transaction; the search layer then falls back to plain ordering.
        db.execute_unprepared(
            "DO $$ BEGIN \
                CREATE EXTENSION IF NOT EXISTS pg_trgm; \
             EXCEPTION WHEN OTHERS THEN \
                RAISE NOTICE 'pg_trgm unavailable: %', SQLERRM; \
             END $$",
        )
        .await?;

        let installed = db
            .query_one(Statement::from_string(
                DbBackend::Postgres,
                "SELECT 1 FROM pg_extension WHERE extname = 'pg_trgm'",
            ))
            .await?
            .is_some();

        if !installed {
            tracing::warn!("pg_trgm unavailable, skipping trigram indexes");
            return Ok(());
        }

        for (name, expr) in TRIGRAM_INDEXES {
            db.execute_unprepared(&format!(
                "CREATE INDEX IF NOT EXISTS {name} ON places USING gin ({expr} gin_trgm_ops)"
            ))
            .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }

        let db = manager.get_connection();
        for (name, _) in TRIGRAM_INDEXES {
            db.execute_unprepared(&format!("DROP INDEX IF EXISTS {name}"))
                .await?;
        }
        db.execute_unprepared("ALTER TABLE places DROP COLUMN IF EXISTS full_address_cached")
            .await?;

        Ok(())
    }
}
