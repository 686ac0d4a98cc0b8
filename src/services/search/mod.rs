//! Place text search and autocomplete.
//!
//! Matching is always case-insensitive substring containment; whether results
//! are additionally ranked by trigram similarity depends on the store and is
//! decided once, when the service is built. Callers hand in an already
//! scoped query (visibility, ownership); this module only narrows it by text.
//!
//! Blank text yields an empty result rather than an error. Callers are
//! expected to skip the call entirely in that case.

use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QuerySelect, Select};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tracing::debug;

use crate::config::SearchConfig;
use crate::constants::search::{MAX_OFFSET, MAX_PAGE_SIZE, SUGGESTION_CANDIDATES};
use crate::entities::places;
use crate::models::place::Place;

pub mod capabilities;
pub mod predicate;
pub mod strategy;
pub mod suggest;

pub use capabilities::StoreCapabilities;
pub use strategy::{FuzzyRankedStrategy, PlainOrderedStrategy, SearchStrategy};
pub use suggest::{SuggestionRow, clamp_limit, rank_suggestions};

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search unavailable: {0}")]
    Unavailable(#[from] DbErr),
}

/// One search or suggestion request.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    text: String,
    scope: Select<places::Entity>,
    limit: Option<u64>,
    offset: u64,
}

impl SearchQuery {
    /// `scope` is the caller's pre-filtered base set, e.g. `PlaceScope::select()`.
    #[must_use]
    pub fn new(text: &str, scope: Select<places::Entity>) -> Self {
        Self {
            text: text.trim().to_string(),
            scope,
            limit: None,
            offset: 0,
        }
    }

    /// Searches every place, including soft-deleted ones.
    #[must_use]
    pub fn everywhere(text: &str) -> Self {
        Self::new(text, places::Entity::find())
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_limit(mut self, limit: Option<u64>) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct SearchService {
    conn: DatabaseConnection,
    settings: SearchConfig,
    capabilities: StoreCapabilities,
    strategy: Arc<dyn SearchStrategy>,
}

impl SearchService {
    /// Probes the store and picks a strategy for the lifetime of the service.
    pub async fn new(conn: DatabaseConnection, settings: SearchConfig) -> Self {
        let capabilities = StoreCapabilities::probe(&conn, settings.fuzzy_ranking).await;
        Self::with_capabilities(conn, settings, capabilities)
    }

    #[must_use]
    pub fn with_capabilities(
        conn: DatabaseConnection,
        settings: SearchConfig,
        capabilities: StoreCapabilities,
    ) -> Self {
        let strategy = capabilities.strategy();
        Self {
            conn,
            settings,
            capabilities,
            strategy,
        }
    }

    #[must_use]
    pub const fn capabilities(&self) -> StoreCapabilities {
        self.capabilities
    }

    #[must_use]
    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// The filtered, ordered, paged query `search` would run.
    #[must_use]
    pub fn search_select(&self, query: &SearchQuery) -> Select<places::Entity> {
        let limit = query
            .limit
            .unwrap_or(self.settings.page_size)
            .min(MAX_PAGE_SIZE);
        self.strategy
            .apply(query.scope.clone(), &query.text)
            .offset(query.offset.min(MAX_OFFSET))
            .limit(limit)
    }

    /// Places matching the query text within its scope, best first.
    pub async fn search(&self, query: SearchQuery) -> Result<Vec<Place>, SearchError> {
        if query.is_blank() {
            debug!("Blank search query, returning no results");
            return Ok(Vec::new());
        }

        let started = Instant::now();
        let models = self.search_select(&query).all(&self.conn).await?;

        self.record("search", started);
        debug!(
            query = %query.text,
            results = models.len(),
            strategy = self.strategy.name(),
            "Place search finished"
        );

        Ok(models.into_iter().map(Place::from).collect())
    }

    /// Up to `limit` (clamped to 1..=20) unique labels for autocomplete.
    pub async fn suggest(&self, query: SearchQuery) -> Result<Vec<String>, SearchError> {
        if query.is_blank() {
            return Ok(Vec::new());
        }

        let limit = clamp_limit(query.limit, self.settings.suggestion_default_limit);
        let started = Instant::now();

        let rows = self
            .strategy
            .apply(query.scope, &query.text)
            .select_only()
            .column(places::Column::Name)
            .column(places::Column::City)
            .column_as(self.strategy.fields().address_expr(), "address")
            .limit(SUGGESTION_CANDIDATES)
            .into_model::<SuggestionRow>()
            .all(&self.conn)
            .await?;

        let candidates = rows.len();
        let labels = rank_suggestions(
            rows,
            &query.text,
            usize::try_from(limit).unwrap_or(usize::MAX),
        );

        self.record("suggest", started);
        debug!(
            query = %query.text,
            candidates,
            suggestions = labels.len(),
            strategy = self.strategy.name(),
            "Place suggestions finished"
        );

        Ok(labels)
    }

    fn record(&self, kind: &'static str, started: Instant) {
        let strategy = self.strategy.name();
        metrics::counter!("place_search_total", "kind" => kind, "strategy" => strategy)
            .increment(1);
        metrics::histogram!("place_search_duration_seconds", "kind" => kind)
            .record(started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn service(capabilities: StoreCapabilities) -> SearchService {
        SearchService::with_capabilities(
            DatabaseConnection::Disconnected,
            SearchConfig::default(),
            capabilities,
        )
    }

    #[test]
    fn test_query_text_is_trimmed() {
        let query = SearchQuery::everywhere("  tokyo  ");
        assert_eq!(query.text(), "tokyo");
        assert!(SearchQuery::everywhere("   ").is_blank());
    }

    #[test]
    fn test_search_select_applies_default_page_size() {
        let service = service(StoreCapabilities::plain(DbBackend::Sqlite));
        let sql = service
            .search_select(&SearchQuery::everywhere("station"))
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains("LIMIT 50"));
        assert_eq!(service.strategy_name(), "plain");
    }

    #[test]
    fn test_search_select_honours_limit_and_offset() {
        let service = service(StoreCapabilities::plain(DbBackend::Sqlite));
        let sql = service
            .search_select(&SearchQuery::everywhere("station").limit(10).offset(20))
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 20"));
    }

    #[test]
    fn test_search_select_bounds_limit_and_offset() {
        let service = service(StoreCapabilities::plain(DbBackend::Sqlite));
        let sql = service
            .search_select(&SearchQuery::everywhere("station").limit(u64::MAX).offset(u64::MAX))
            .build(DbBackend::Sqlite)
            .to_string();

        assert!(sql.contains(&format!("LIMIT {MAX_PAGE_SIZE}")));
        assert!(sql.contains(&format!("OFFSET {}", i64::MAX)));
    }

    #[tokio::test]
    async fn test_blank_queries_skip_the_store() {
        let service = service(StoreCapabilities::plain(DbBackend::Sqlite));

        assert!(service.search(SearchQuery::everywhere(" ")).await.unwrap().is_empty());
        assert!(service.suggest(SearchQuery::everywhere("")).await.unwrap().is_empty());
    }
}
