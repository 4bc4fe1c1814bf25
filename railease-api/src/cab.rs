use axum::{
    extract::{Path, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use railease_cab::models::{CabBooking, DriverProfile};
use railease_cab::store::CabStoreError;
use railease_core::identity::SessionContext;
use railease_shared::pii::Masked;

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct CreateCabBookingRequest {
    pickup_location: String,
    drop_location: String,
    vehicle_type: String,
    price: i64,
}

#[derive(Debug, Deserialize)]
struct UpdateProfileRequest {
    vehicle_number: Option<String>,
    vehicle_type: Option<String>,
    license_number: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AvailabilityRequest {
    is_available: bool,
}

/// Routes behind passenger auth.
pub fn passenger_routes() -> Router<AppState> {
    Router::new().route("/v1/cab/bookings", post(create_cab_booking))
}

/// Routes behind driver auth.
pub fn driver_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/cab/requests", get(list_requests))
        .route("/v1/cab/requests/{id}/accept", post(accept_request))
        .route("/v1/cab/rides/{id}/complete", post(complete_ride))
        .route("/v1/driver/profile", get(get_profile).put(update_profile))
        .route("/v1/driver/availability", post(set_availability))
}

async fn create_cab_booking(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<CreateCabBookingRequest>,
) -> Result<Json<CabBooking>, AppError> {
    if req.price < 0 {
        return Err(AppError::ValidationError("Fare cannot be negative".to_string()));
    }

    let booking = CabBooking::new(
        session.user_id,
        req.pickup_location,
        req.drop_location,
        req.vehicle_type,
        req.price,
    );

    state
        .cab
        .insert_booking(&booking)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?;

    tracing::info!("Cab booking created: {}", booking.booking_code);
    Ok(Json(booking))
}

async fn list_requests(
    State(state): State<AppState>,
    Extension(_session): Extension<SessionContext>,
) -> Result<Json<Vec<CabBooking>>, AppError> {
    let requests = state
        .cab
        .list_open_requests()
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?;

    Ok(Json(requests))
}

async fn accept_request(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<CabBooking>, AppError> {
    // 1. The driver must exist and be accepting rides
    let profile = state
        .cab
        .get_profile(session.user_id)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Driver profile not found".to_string()))?;

    if !profile.is_available {
        return Err(AppError::ConflictError(
            "Set yourself available before accepting rides".to_string(),
        ));
    }

    // 2. Claim the request; exactly one driver wins
    match state.cab.accept_request(booking_id, session.user_id).await {
        Ok(booking) => Ok(Json(booking)),
        Err(CabStoreError::RequestTaken(_)) => Err(AppError::ConflictError(
            "This request is no longer open".to_string(),
        )),
        Err(e) => Err(AppError::PersistenceFailure(e.to_string())),
    }
}

async fn complete_ride(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(booking_id): Path<Uuid>,
) -> Result<Json<CabBooking>, AppError> {
    match state.cab.complete_ride(booking_id, session.user_id).await {
        Ok(booking) => Ok(Json(booking)),
        Err(CabStoreError::NotFound(_)) => Err(AppError::NotFoundError(
            "No accepted ride with this id for you".to_string(),
        )),
        Err(e) => Err(AppError::PersistenceFailure(e.to_string())),
    }
}

async fn get_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<DriverProfile>, AppError> {
    let profile = state
        .cab
        .get_profile(session.user_id)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError("Driver profile not found".to_string()))?;

    Ok(Json(profile))
}

async fn update_profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<DriverProfile>, AppError> {
    // First save creates the profile, later saves keep tallies untouched
    let mut profile = state
        .cab
        .get_profile(session.user_id)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?
        .unwrap_or_else(|| DriverProfile::new(session.user_id));

    profile.vehicle_number = req.vehicle_number;
    profile.vehicle_type = req.vehicle_type;
    profile.license_number = req.license_number.map(Masked::new);

    state
        .cab
        .upsert_profile(&profile)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?;

    Ok(Json(profile))
}

async fn set_availability(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<AvailabilityRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    match state.cab.set_availability(session.user_id, req.is_available).await {
        Ok(()) => Ok(Json(serde_json::json!({ "is_available": req.is_available }))),
        Err(CabStoreError::ProfileNotFound(_)) => Err(AppError::NotFoundError(
            "Driver profile not found".to_string(),
        )),
        Err(e) => Err(AppError::PersistenceFailure(e.to_string())),
    }
}
