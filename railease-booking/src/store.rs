use async_trait::async_trait;
use railease_core::pnr::Pnr;
use uuid::Uuid;

use crate::models::{Booking, BookingRecord, BookingWithJourney};

#[derive(Debug, thiserror::Error)]
pub enum BookingStoreError {
    /// The availability compare-and-swap flipped fewer rows than seats were
    /// requested: someone else confirmed at least one of them first.
    #[error("{requested} seat(s) requested but only {updated} still available")]
    SeatsNoLongerAvailable { requested: usize, updated: usize },

    #[error("A booking with PNR {0} already exists")]
    DuplicatePnr(String),

    #[error("Booking store backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Persistence contract for bookings. The write is the source of truth: a
/// booking is only reported confirmed after `insert_booking` returns Ok.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Atomically flip the selected seats to unavailable and persist the
    /// record; both happen in one transaction or not at all.
    async fn insert_booking(&self, record: &BookingRecord) -> Result<Booking, BookingStoreError>;

    /// Look a booking up by PNR, joined with its train and stations.
    async fn find_by_pnr(&self, pnr: &Pnr)
        -> Result<Option<BookingWithJourney>, BookingStoreError>;

    /// All bookings of one user, newest first.
    async fn list_for_user(&self, user_id: Uuid)
        -> Result<Vec<BookingWithJourney>, BookingStoreError>;
}
