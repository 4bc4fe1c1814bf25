use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use railease_booking::assembler::{assemble, BookingDraft};
use railease_booking::models::{BookingStatus, BookingWithJourney};
use railease_booking::store::BookingStoreError;
use railease_booking::summary::{summarize, BookingSummary};
use railease_booking::ticket::render_ticket;
use railease_catalog::pricing::fare_per_seat;
use railease_core::identity::SessionContext;
use railease_core::pnr::Pnr;

use crate::{error::AppError, state::AppState};

// A fresh PNR is drawn again on the rare collision with an existing booking.
const PNR_ATTEMPTS: usize = 3;

#[derive(Debug, Deserialize)]
struct QuoteRequest {
    train_id: Uuid,
    class: String,
    seat_count: u32,
}

#[derive(Debug, Deserialize)]
struct PassengerInput {
    name: String,
    /// Free text, parsed by the assembler.
    age: String,
    gender: String,
}

#[derive(Debug, Deserialize)]
struct CreateBookingRequest {
    train_id: Uuid,
    journey_date: NaiveDate,
    passenger: PassengerInput,
    seat_numbers: Vec<String>,
    coach: String,
    class: String,
}

#[derive(Debug, Serialize)]
struct BookingResponse {
    booking_id: Uuid,
    pnr: Pnr,
    status: BookingStatus,
    summary: BookingSummary,
}

/// Routes behind passenger auth.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/v1/bookings/quote", post(quote_booking))
        .route("/v1/bookings", post(commit_booking).get(list_my_bookings))
        .route("/v1/bookings/{pnr}/ticket", get(download_ticket))
}

/// Routes open to anyone: PNR lookup does not require a session.
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/v1/pnr/{pnr}", get(pnr_status))
}

/// Fare summary for the review screen. Shares `summarize` with the commit
/// path, so the displayed and persisted totals are the same value.
async fn quote_booking(
    State(state): State<AppState>,
    Json(req): Json<QuoteRequest>,
) -> Result<Json<BookingSummary>, AppError> {
    let train = state
        .directory
        .get_train(req.train_id)
        .await
        .map_err(|e| {
            tracing::error!("Train lookup failed: {}", e);
            AppError::CatalogUnavailable("Train directory is unavailable".to_string())
        })?
        .ok_or_else(|| AppError::NotFoundError(format!("Train {} not found", req.train_id)))?;

    let fare = fare_per_seat(&train, &req.class);
    let summary = summarize(req.seat_count, fare, state.business_rules.booking_fee);

    Ok(Json(summary))
}

async fn commit_booking(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    // 1. Resolve the train; fare and totals derive from it
    let train = state
        .directory
        .get_train(req.train_id)
        .await
        .map_err(|e| {
            tracing::error!("Train lookup failed: {}", e);
            AppError::CatalogUnavailable("Train directory is unavailable".to_string())
        })?
        .ok_or_else(|| AppError::NotFoundError(format!("Train {} not found", req.train_id)))?;

    // 2. Price the selection with the same calculator the quote used
    let fare = fare_per_seat(&train, &req.class);
    let summary = summarize(
        req.seat_numbers.len() as u32,
        fare,
        state.business_rules.booking_fee,
    );

    // 3. Assemble the record; any missing/unparseable field blocks the write
    let draft = BookingDraft {
        pnr: None,
        user_id: Some(session.user_id),
        train_id: Some(train.id),
        passenger_name: Some(req.passenger.name),
        passenger_age: Some(req.passenger.age),
        passenger_gender: Some(req.passenger.gender),
        journey_date: Some(req.journey_date),
        seat_numbers: req.seat_numbers,
        coach: Some(req.coach),
        class_label: Some(req.class),
        class_price: Some(fare),
        total_amount: Some(summary.total_amount),
    };

    // 4. Commit; the confirmed state exists only after the write succeeds
    for _ in 0..PNR_ATTEMPTS {
        let mut attempt = draft.clone();
        attempt.pnr = Some(Pnr::generate());
        let record = assemble(attempt)
            .map_err(|e| AppError::MissingBookingField(e.to_string()))?;

        match state.bookings.insert_booking(&record).await {
            Ok(booking) => {
                tracing::info!("Booking confirmed: {}", booking.record.pnr);
                return Ok(Json(BookingResponse {
                    booking_id: booking.id,
                    pnr: booking.record.pnr.clone(),
                    status: booking.status,
                    summary,
                }));
            }
            Err(BookingStoreError::SeatsNoLongerAvailable { requested, updated }) => {
                return Err(AppError::ConflictError(format!(
                    "Seats were taken by another booking ({} of {} still available)",
                    updated, requested
                )));
            }
            Err(BookingStoreError::DuplicatePnr(pnr)) => {
                tracing::warn!("PNR collision on {}, retrying", pnr);
                continue;
            }
            Err(BookingStoreError::Backend(e)) => {
                return Err(AppError::PersistenceFailure(e.to_string()));
            }
        }
    }

    Err(AppError::PersistenceFailure(
        "Could not allocate a unique PNR".to_string(),
    ))
}

async fn list_my_bookings(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<BookingWithJourney>>, AppError> {
    let bookings = state
        .bookings
        .list_for_user(session.user_id)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?;

    Ok(Json(bookings))
}

async fn pnr_status(
    State(state): State<AppState>,
    Path(pnr): Path<String>,
) -> Result<Json<BookingWithJourney>, AppError> {
    let pnr = Pnr::parse(&pnr).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let booking = state
        .bookings
        .find_by_pnr(&pnr)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("No booking found for PNR {}", pnr)))?;

    Ok(Json(booking))
}

async fn download_ticket(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(pnr): Path<String>,
) -> Result<Response, AppError> {
    let pnr = Pnr::parse(&pnr).map_err(|e| AppError::ValidationError(e.to_string()))?;

    let view = state
        .bookings
        .find_by_pnr(&pnr)
        .await
        .map_err(|e| AppError::PersistenceFailure(e.to_string()))?
        .ok_or_else(|| AppError::NotFoundError(format!("No booking found for PNR {}", pnr)))?;

    if view.booking.record.user_id != session.user_id {
        return Err(AppError::AuthorizationError(
            "This booking belongs to a different user".to_string(),
        ));
    }

    let ticket = render_ticket(&view);

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        ticket,
    )
        .into_response())
}
