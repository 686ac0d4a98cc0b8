//! Place API endpoints.
//!
//! Handlers only map HTTP to [`PlaceService`] calls; scoping, authorization
//! and search all live behind the service.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::CurrentActor;
use super::validation::{validate_page, validate_place_id, validate_search_query};
use super::{ApiError, ApiResponse, AppState, ListPlacesQuery, SuggestQuery};
use crate::models::place::{NewPlace, Place};
use crate::services::PlacePage;

/// Lists places newest first, or searches them when `q` is present.
///
/// # Endpoint
/// `GET /api/places?q=&page=&mine=&deleted=`
pub async fn list_places(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Query(params): Query<ListPlacesQuery>,
) -> Result<Json<ApiResponse<PlacePage>>, ApiError> {
    let page = validate_page(params.page)?;
    let mut filter = params.filter();
    filter.query = validate_search_query(params.q.as_deref())?.map(str::to_string);

    let result = state.place_service().list(actor, filter, page).await?;
    Ok(Json(ApiResponse::success(result)))
}

/// Autocomplete labels for a partial query.
///
/// # Endpoint
/// `GET /api/places/suggest?q=&limit=&mine=`
pub async fn suggest_places(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Query(params): Query<SuggestQuery>,
) -> Result<Json<ApiResponse<Vec<String>>>, ApiError> {
    let mut filter = params.filter();
    filter.query = validate_search_query(params.q.as_deref())?.map(str::to_string);

    let labels = state
        .place_service()
        .suggest(actor, filter, params.limit)
        .await?;
    Ok(Json(ApiResponse::success(labels)))
}

pub async fn get_place(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Place>>, ApiError> {
    let id = validate_place_id(id)?;
    let place = state.place_service().get(actor, id).await?;
    Ok(Json(ApiResponse::success(place)))
}

pub async fn create_place(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Json(body): Json<NewPlace>,
) -> Result<(StatusCode, Json<ApiResponse<Place>>), ApiError> {
    let place = state.place_service().create(actor, body).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(place))))
}

/// Soft delete.
pub async fn delete_place(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let id = validate_place_id(id)?;
    state.place_service().delete(actor, id).await?;
    Ok(Json(ApiResponse::success(())))
}

pub async fn restore_place(
    State(state): State<Arc<AppState>>,
    CurrentActor(actor): CurrentActor,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Place>>, ApiError> {
    let id = validate_place_id(id)?;
    let place = state.place_service().restore(actor, id).await?;
    Ok(Json(ApiResponse::success(place)))
}
