use serde::{Deserialize, Serialize};

use crate::domain::DeletedFilter;
use crate::services::PlaceFilter;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Query string of `GET /api/places`.
#[derive(Debug, Deserialize)]
pub struct ListPlacesQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default)]
    pub mine: bool,
    #[serde(default)]
    pub deleted: DeletedFilter,
}

const fn default_page() -> u64 {
    1
}

impl ListPlacesQuery {
    #[must_use]
    pub fn filter(&self) -> PlaceFilter {
        PlaceFilter {
            query: self.q.clone(),
            mine: self.mine,
            deleted: self.deleted,
        }
    }
}

/// Query string of `GET /api/places/suggest`.
#[derive(Debug, Deserialize)]
pub struct SuggestQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub mine: bool,
}

impl SuggestQuery {
    #[must_use]
    pub fn filter(&self) -> PlaceFilter {
        PlaceFilter {
            query: self.q.clone(),
            mine: self.mine,
            deleted: DeletedFilter::Exclude,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthDto {
    pub status: &'static str,
    pub database: bool,
    pub search_strategy: &'static str,
    pub version: &'static str,
    pub uptime: u64,
}
