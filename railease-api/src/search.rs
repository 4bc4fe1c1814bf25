use axum::{extract::State, routing::post, Json, Router};
use chrono::Datelike;

use railease_core::search::{TrainOption, TrainSearchRequest, TrainSearchResult};

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/trains/search", post(search_trains))
}

async fn search_trains(
    State(state): State<AppState>,
    Json(req): Json<TrainSearchRequest>,
) -> Result<Json<TrainSearchResult>, AppError> {
    let weekday = req.journey_date.weekday();

    let trains = state
        .directory
        .search_trains(req.from_station_id, req.to_station_id, weekday)
        .await
        .map_err(|e| {
            tracing::error!("Train search failed: {}", e);
            AppError::CatalogUnavailable("Train directory is unavailable".to_string())
        })?;

    let options = trains
        .into_iter()
        .map(|train| TrainOption {
            train_id: train.id,
            number: train.number,
            name: train.name,
            departure_time: train.departure_time,
            arrival_time: train.arrival_time,
            duration: train.duration,
            base_price: train.price,
            total_seats: train.total_seats,
        })
        .collect();

    Ok(Json(TrainSearchResult { trains: options }))
}
