use chrono::Utc;
use uuid::Uuid;

use crate::models::{CabBooking, CabStatus, DriverProfile};

#[derive(Debug, thiserror::Error)]
pub enum CabError {
    #[error("Cab booking not found: {0}")]
    NotFound(String),

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Driver {0} is not accepting rides")]
    DriverUnavailable(Uuid),

    #[error("Ride {0} belongs to a different driver")]
    NotRideOwner(Uuid),
}

/// Transition: Requested → Accepted. Only an available driver may claim an
/// unclaimed request.
pub fn accept(booking: &mut CabBooking, driver: &DriverProfile) -> Result<(), CabError> {
    if booking.status != CabStatus::Requested || booking.driver_id.is_some() {
        return Err(CabError::InvalidTransition {
            from: booking.status.as_str().to_string(),
            to: "accepted".to_string(),
        });
    }
    if !driver.is_available {
        return Err(CabError::DriverUnavailable(driver.user_id));
    }

    booking.driver_id = Some(driver.user_id);
    booking.status = CabStatus::Accepted;
    booking.updated_at = Utc::now();
    Ok(())
}

/// Transition: Accepted → Completed. Credits the fare to the driver's
/// tallies; only the claiming driver can complete the ride.
pub fn complete(
    booking: &mut CabBooking,
    driver: &mut DriverProfile,
) -> Result<(), CabError> {
    if booking.status != CabStatus::Accepted {
        return Err(CabError::InvalidTransition {
            from: booking.status.as_str().to_string(),
            to: "completed".to_string(),
        });
    }
    if booking.driver_id != Some(driver.user_id) {
        return Err(CabError::NotRideOwner(booking.id));
    }

    booking.status = CabStatus::Completed;
    booking.updated_at = Utc::now();
    driver.total_rides += 1;
    driver.total_earnings += booking.price;
    Ok(())
}

/// Cancel a ride that has not been completed.
pub fn cancel(booking: &mut CabBooking) -> Result<(), CabError> {
    if booking.status == CabStatus::Completed {
        return Err(CabError::InvalidTransition {
            from: booking.status.as_str().to_string(),
            to: "cancelled".to_string(),
        });
    }
    booking.status = CabStatus::Cancelled;
    booking.updated_at = Utc::now();
    Ok(())
}
