use chrono::{DateTime, Utc};
use railease_core::pnr::generate_code;
use railease_shared::pii::Masked;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CabStatus {
    Requested,
    Accepted,
    Completed,
    Cancelled,
}

impl CabStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CabStatus::Requested => "requested",
            CabStatus::Accepted => "accepted",
            CabStatus::Completed => "completed",
            CabStatus::Cancelled => "cancelled",
        }
    }

    pub fn from_str(value: &str) -> Self {
        match value {
            "accepted" => CabStatus::Accepted,
            "completed" => CabStatus::Completed,
            "cancelled" => CabStatus::Cancelled,
            _ => CabStatus::Requested,
        }
    }
}

/// A station-to-door cab ride attached to the rail product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CabBooking {
    pub id: Uuid,
    /// Short reference code shown to the rider, e.g. `CB43921058`.
    pub booking_code: String,
    pub user_id: Uuid,
    pub pickup_location: String,
    pub drop_location: String,
    pub vehicle_type: String,
    pub price: i64,
    pub status: CabStatus,
    pub driver_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CabBooking {
    pub fn new(
        user_id: Uuid,
        pickup_location: String,
        drop_location: String,
        vehicle_type: String,
        price: i64,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            booking_code: generate_code("CB", 8),
            user_id,
            pickup_location,
            drop_location,
            vehicle_type,
            price,
            status: CabStatus::Requested,
            driver_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A driver's dashboard profile. Earnings and ride tallies only move through
/// ride completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverProfile {
    pub user_id: Uuid,
    pub vehicle_number: Option<String>,
    pub vehicle_type: Option<String>,
    pub license_number: Option<Masked<String>>,
    pub is_available: bool,
    pub rating: f64,
    pub total_rides: i32,
    pub total_earnings: i64,
}

impl DriverProfile {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            vehicle_number: None,
            vehicle_type: None,
            license_number: None,
            is_available: false,
            rating: 5.0,
            total_rides: 0,
            total_earnings: 0,
        }
    }
}
