use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{CabBooking, DriverProfile};

#[derive(Debug, thiserror::Error)]
pub enum CabStoreError {
    /// The guarded claim update matched no row: another driver got there
    /// first, or the request was cancelled.
    #[error("Cab request {0} is no longer open")]
    RequestTaken(Uuid),

    #[error("Cab booking not found: {0}")]
    NotFound(Uuid),

    #[error("Driver profile not found for user {0}")]
    ProfileNotFound(Uuid),

    #[error("Cab store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Persistence contract for the cab feature.
#[async_trait]
pub trait CabStore: Send + Sync {
    async fn insert_booking(&self, booking: &CabBooking) -> Result<(), CabStoreError>;

    /// Requests nobody has claimed yet, oldest first.
    async fn list_open_requests(&self) -> Result<Vec<CabBooking>, CabStoreError>;

    /// Claim an open request for a driver. The claim is guarded: it succeeds
    /// for exactly one driver per request.
    async fn accept_request(
        &self,
        booking_id: Uuid,
        driver_id: Uuid,
    ) -> Result<CabBooking, CabStoreError>;

    /// Complete an accepted ride and credit the fare to the driver.
    async fn complete_ride(
        &self,
        booking_id: Uuid,
        driver_id: Uuid,
    ) -> Result<CabBooking, CabStoreError>;

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<DriverProfile>, CabStoreError>;

    async fn upsert_profile(&self, profile: &DriverProfile) -> Result<(), CabStoreError>;

    async fn set_availability(&self, user_id: Uuid, available: bool) -> Result<(), CabStoreError>;
}
