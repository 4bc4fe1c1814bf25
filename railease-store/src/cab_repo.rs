use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use railease_cab::models::{CabBooking, CabStatus, DriverProfile};
use railease_cab::store::{CabStore, CabStoreError};
use railease_shared::pii::Masked;

pub struct PostgresCabStore {
    pool: PgPool,
}

impl PostgresCabStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> CabStoreError {
    CabStoreError::Backend(Box::new(e))
}

#[derive(sqlx::FromRow)]
struct CabBookingRow {
    id: Uuid,
    booking_code: String,
    user_id: Uuid,
    pickup_location: String,
    drop_location: String,
    vehicle_type: String,
    price: i64,
    status: String,
    driver_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CabBookingRow {
    fn into_booking(self) -> CabBooking {
        CabBooking {
            id: self.id,
            booking_code: self.booking_code,
            user_id: self.user_id,
            pickup_location: self.pickup_location,
            drop_location: self.drop_location,
            vehicle_type: self.vehicle_type,
            price: self.price,
            status: CabStatus::from_str(&self.status),
            driver_id: self.driver_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DriverProfileRow {
    user_id: Uuid,
    vehicle_number: Option<String>,
    vehicle_type: Option<String>,
    license_number: Option<String>,
    is_available: bool,
    rating: f64,
    total_rides: i32,
    total_earnings: i64,
}

impl DriverProfileRow {
    fn into_profile(self) -> DriverProfile {
        DriverProfile {
            user_id: self.user_id,
            vehicle_number: self.vehicle_number,
            vehicle_type: self.vehicle_type,
            license_number: self.license_number.map(Masked::new),
            is_available: self.is_available,
            rating: self.rating,
            total_rides: self.total_rides,
            total_earnings: self.total_earnings,
        }
    }
}

const CAB_COLUMNS: &str = "id, booking_code, user_id, pickup_location, drop_location, \
     vehicle_type, price, status, driver_id, created_at, updated_at";

#[async_trait]
impl CabStore for PostgresCabStore {
    async fn insert_booking(&self, booking: &CabBooking) -> Result<(), CabStoreError> {
        sqlx::query(
            "INSERT INTO cab_bookings \
                (id, booking_code, user_id, pickup_location, drop_location, \
                 vehicle_type, price, status, driver_id, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(booking.id)
        .bind(&booking.booking_code)
        .bind(booking.user_id)
        .bind(&booking.pickup_location)
        .bind(&booking.drop_location)
        .bind(&booking.vehicle_type)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .bind(booking.driver_id)
        .bind(booking.created_at)
        .bind(booking.updated_at)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn list_open_requests(&self) -> Result<Vec<CabBooking>, CabStoreError> {
        let rows = sqlx::query_as::<_, CabBookingRow>(&format!(
            "SELECT {CAB_COLUMNS} FROM cab_bookings \
             WHERE status = 'requested' AND driver_id IS NULL ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        Ok(rows.into_iter().map(CabBookingRow::into_booking).collect())
    }

    async fn accept_request(
        &self,
        booking_id: Uuid,
        driver_id: Uuid,
    ) -> Result<CabBooking, CabStoreError> {
        // Guarded claim: succeeds for exactly one driver per request.
        let row = sqlx::query_as::<_, CabBookingRow>(&format!(
            "UPDATE cab_bookings \
             SET driver_id = $2, status = 'accepted', updated_at = NOW() \
             WHERE id = $1 AND status = 'requested' AND driver_id IS NULL \
             RETURNING {CAB_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(driver_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(CabBookingRow::into_booking)
            .ok_or(CabStoreError::RequestTaken(booking_id))
    }

    async fn complete_ride(
        &self,
        booking_id: Uuid,
        driver_id: Uuid,
    ) -> Result<CabBooking, CabStoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // 1. Close the ride; only the claiming driver matches.
        let row = sqlx::query_as::<_, CabBookingRow>(&format!(
            "UPDATE cab_bookings \
             SET status = 'completed', updated_at = NOW() \
             WHERE id = $1 AND driver_id = $2 AND status = 'accepted' \
             RETURNING {CAB_COLUMNS}"
        ))
        .bind(booking_id)
        .bind(driver_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(backend)?;

        let booking = match row {
            Some(row) => row.into_booking(),
            None => {
                let _ = tx.rollback().await;
                return Err(CabStoreError::NotFound(booking_id));
            }
        };

        // 2. Credit the fare to the driver's tallies
        let updated = sqlx::query(
            "UPDATE driver_profiles \
             SET total_rides = total_rides + 1, total_earnings = total_earnings + $2, \
                 updated_at = NOW() \
             WHERE user_id = $1",
        )
        .bind(driver_id)
        .bind(booking.price)
        .execute(&mut *tx)
        .await
        .map_err(backend)?
        .rows_affected();

        if updated == 0 {
            let _ = tx.rollback().await;
            return Err(CabStoreError::ProfileNotFound(driver_id));
        }

        tx.commit().await.map_err(backend)?;

        tracing::info!("Ride {} completed by driver {}", booking.booking_code, driver_id);

        Ok(booking)
    }

    async fn get_profile(&self, user_id: Uuid) -> Result<Option<DriverProfile>, CabStoreError> {
        let row = sqlx::query_as::<_, DriverProfileRow>(
            "SELECT user_id, vehicle_number, vehicle_type, license_number, \
                    is_available, rating, total_rides, total_earnings \
             FROM driver_profiles WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        Ok(row.map(DriverProfileRow::into_profile))
    }

    async fn upsert_profile(&self, profile: &DriverProfile) -> Result<(), CabStoreError> {
        sqlx::query(
            "INSERT INTO driver_profiles \
                (user_id, vehicle_number, vehicle_type, license_number, \
                 is_available, rating, total_rides, total_earnings, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, NOW()) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 vehicle_number = EXCLUDED.vehicle_number, \
                 vehicle_type = EXCLUDED.vehicle_type, \
                 license_number = EXCLUDED.license_number, \
                 updated_at = NOW()",
        )
        .bind(profile.user_id)
        .bind(&profile.vehicle_number)
        .bind(&profile.vehicle_type)
        .bind(profile.license_number.as_ref().map(|l| l.expose().clone()))
        .bind(profile.is_available)
        .bind(profile.rating)
        .bind(profile.total_rides)
        .bind(profile.total_earnings)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn set_availability(&self, user_id: Uuid, available: bool) -> Result<(), CabStoreError> {
        let updated = sqlx::query(
            "UPDATE driver_profiles SET is_available = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(available)
        .execute(&self.pool)
        .await
        .map_err(backend)?
        .rows_affected();

        if updated == 0 {
            return Err(CabStoreError::ProfileNotFound(user_id));
        }
        Ok(())
    }
}
