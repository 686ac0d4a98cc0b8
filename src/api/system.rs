use axum::{Json, extract::State};
use std::sync::Arc;

use super::{ApiResponse, AppState, HealthDto};

/// Liveness plus a database round trip.
///
/// # Endpoint
/// `GET /api/system/health`
///
/// Always answers 200; `status` is `"degraded"` when the database ping fails.
pub async fn get_health(State(state): State<Arc<AppState>>) -> Json<ApiResponse<HealthDto>> {
    let database = match state.store().ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            false
        }
    };

    Json(ApiResponse::success(HealthDto {
        status: if database { "ok" } else { "degraded" },
        database,
        search_strategy: state.search_service().strategy_name(),
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
    }))
}
