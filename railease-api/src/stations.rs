use axum::{extract::State, routing::get, Json, Router};

use railease_catalog::model::Station;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/stations", get(list_stations))
}

async fn list_stations(State(state): State<AppState>) -> Result<Json<Vec<Station>>, AppError> {
    let stations = state.directory.fetch_stations().await.map_err(|e| {
        tracing::error!("Station fetch failed: {}", e);
        AppError::CatalogUnavailable("Station directory is unavailable".to_string())
    })?;

    Ok(Json(stations))
}
