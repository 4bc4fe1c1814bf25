use async_trait::async_trait;
use chrono::Weekday;
use uuid::Uuid;

use crate::model::{Seat, Station, Train};

/// Seat catalog service. Re-invoked on every coach or train change; the
/// returned sequence replaces, never merges into, any prior catalog.
#[async_trait]
pub trait SeatCatalog: Send + Sync {
    /// Seats for one train+coach, ordered by seat number.
    async fn fetch_seats(
        &self,
        train_id: Uuid,
        coach: &str,
    ) -> Result<Vec<Seat>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Train/station directory service.
#[async_trait]
pub trait Directory: Send + Sync {
    async fn fetch_stations(
        &self,
    ) -> Result<Vec<Station>, Box<dyn std::error::Error + Send + Sync>>;

    /// Trains between two stations that operate on the given weekday.
    async fn search_trains(
        &self,
        from_station_id: Uuid,
        to_station_id: Uuid,
        weekday: Weekday,
    ) -> Result<Vec<Train>, Box<dyn std::error::Error + Send + Sync>>;

    async fn get_train(
        &self,
        train_id: Uuid,
    ) -> Result<Option<Train>, Box<dyn std::error::Error + Send + Sync>>;
}
