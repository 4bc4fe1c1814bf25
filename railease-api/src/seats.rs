use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use railease_catalog::model::Seat;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct SeatQuery {
    coach: String,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trains/{train_id}/seats", get(fetch_seats))
}

/// One coach's seat map, ordered by seat number. Callers refetch on every
/// coach change and replace whatever they held before.
async fn fetch_seats(
    State(state): State<AppState>,
    Path(train_id): Path<Uuid>,
    Query(query): Query<SeatQuery>,
) -> Result<Json<Vec<Seat>>, AppError> {
    let seats = state
        .seats
        .fetch_seats(train_id, &query.coach)
        .await
        .map_err(|e| {
            tracing::error!("Seat fetch failed for train {}: {}", train_id, e);
            AppError::CatalogUnavailable("Seat map is unavailable".to_string())
        })?;

    Ok(Json(seats))
}
