//! Domain service for places.
//!
//! Resolves who may see which places into a [`PlaceScope`], then either pages
//! through that scope or hands it to the search layer.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::places::MAX_NAME_LEN;
use crate::db::PlaceScope;
use crate::domain::{Actor, DeletedFilter, PlaceId};
use crate::models::place::{NewPlace, Place};
use crate::services::search::SearchError;

/// Which places a listing, search or suggestion covers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceFilter {
    /// Free text; blank means "no text filter".
    #[serde(default, alias = "q")]
    pub query: Option<String>,

    /// Only the caller's own places.
    #[serde(default)]
    pub mine: bool,

    #[serde(default)]
    pub deleted: DeletedFilter,
}

impl PlaceFilter {
    #[must_use]
    pub fn text(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    /// Trimmed query text, `None` when absent or blank.
    #[must_use]
    pub fn search_text(&self) -> Option<&str> {
        self.query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlacePage {
    pub places: Vec<Place>,
    pub page: u64,
    pub per_page: u64,
    /// Size of the whole scope. Not computed for text searches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
}

#[derive(Debug, Error)]
pub enum PlaceError {
    #[error("Place not found: {0}")]
    NotFound(PlaceId),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}

impl From<sea_orm::DbErr> for PlaceError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for PlaceError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

#[async_trait::async_trait]
pub trait PlaceService: Send + Sync {
    /// Newest-first page of the scope, or a ranked page of matches when the
    /// filter carries query text. `page` starts at 1.
    async fn list(
        &self,
        actor: Option<Actor>,
        filter: PlaceFilter,
        page: u64,
    ) -> Result<PlacePage, PlaceError>;

    /// Autocomplete labels. Blank text returns an empty list.
    async fn suggest(
        &self,
        actor: Option<Actor>,
        filter: PlaceFilter,
        limit: Option<u64>,
    ) -> Result<Vec<String>, PlaceError>;

    /// Soft-deleted places are only visible to their owner or an admin.
    async fn get(&self, actor: Option<Actor>, id: PlaceId) -> Result<Place, PlaceError>;

    async fn create(&self, actor: Option<Actor>, place: NewPlace) -> Result<Place, PlaceError>;

    /// Soft-deletes a place. Owner or admin only.
    async fn delete(&self, actor: Option<Actor>, id: PlaceId) -> Result<(), PlaceError>;

    /// Reverses a soft delete. Owner or admin only.
    async fn restore(&self, actor: Option<Actor>, id: PlaceId) -> Result<Place, PlaceError>;
}

/// Turns a filter into a scope, enforcing who may ask for what.
pub fn resolve_scope(actor: Option<&Actor>, filter: &PlaceFilter) -> Result<PlaceScope, PlaceError> {
    let mut scope = if filter.mine {
        let actor = actor.ok_or(PlaceError::Unauthorized)?;
        PlaceScope::owned_by(actor.user_id)
    } else {
        PlaceScope::visible()
    };

    if filter.deleted != DeletedFilter::Exclude {
        match actor {
            None => return Err(PlaceError::Unauthorized),
            Some(a) if !a.is_admin() => {
                return Err(PlaceError::Forbidden(
                    "Only admins can list deleted places".to_string(),
                ));
            }
            Some(_) => scope = scope.with_deleted(filter.deleted),
        }
    }

    Ok(scope)
}

pub fn validate_new_place(place: &NewPlace) -> Result<(), PlaceError> {
    if place.name.trim().is_empty() {
        return Err(PlaceError::Validation("Name cannot be empty".to_string()));
    }

    if place.name.chars().count() > MAX_NAME_LEN {
        return Err(PlaceError::Validation(format!(
            "Name must be {MAX_NAME_LEN} characters or less"
        )));
    }

    match (place.latitude, place.longitude) {
        (None, None) => {}
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(PlaceError::Validation(format!(
                    "Latitude {lat} is out of range"
                )));
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(PlaceError::Validation(format!(
                    "Longitude {lng} is out of range"
                )));
            }
        }
        _ => {
            return Err(PlaceError::Validation(
                "Latitude and longitude must be given together".to_string(),
            ));
        }
    }

    Ok(())
}
