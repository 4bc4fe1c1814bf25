use chrono::{DateTime, NaiveDate, Utc};
use railease_core::pnr::Pnr;
use railease_shared::pii::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Pending => "pending",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "cancelled" => BookingStatus::Cancelled,
            "pending" => BookingStatus::Pending,
            _ => BookingStatus::Confirmed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassengerDetails {
    pub name: Masked<String>,
    pub age: i32,
    pub gender: String,
}

/// The exact shape persisted at confirmation time. Produced only by the
/// assembler, which guarantees every field is present and parseable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub pnr: Pnr,
    pub user_id: Uuid,
    pub train_id: Uuid,
    pub passenger: PassengerDetails,
    pub journey_date: NaiveDate,
    pub seat_numbers: Vec<String>,
    pub coach: String,
    #[serde(rename = "class")]
    pub class_label: String,
    /// Per-seat fare at the time of booking.
    pub class_price: i64,
    pub total_amount: i64,
}

/// A persisted booking. Created once, never mutated here; cancellation is
/// out of scope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: BookingRecord,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainSummary {
    pub name: String,
    pub number: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StationSummary {
    pub name: String,
    pub code: String,
    pub city: String,
}

/// A booking joined with its train and both end stations, as needed for PNR
/// display and ticket export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWithJourney {
    #[serde(flatten)]
    pub booking: Booking,
    pub train: TrainSummary,
    pub from_station: StationSummary,
    pub to_station: StationSummary,
}
