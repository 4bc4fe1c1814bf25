use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use railease_booking::models::{
    Booking, BookingRecord, BookingStatus, BookingWithJourney, PassengerDetails, StationSummary,
    TrainSummary,
};
use railease_booking::store::{BookingStore, BookingStoreError};
use railease_core::pnr::Pnr;
use railease_shared::pii::Masked;

pub struct PostgresBookingStore {
    pool: PgPool,
}

impl PostgresBookingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> BookingStoreError {
    BookingStoreError::Backend(Box::new(e))
}

#[derive(sqlx::FromRow)]
struct BookingJoinRow {
    id: Uuid,
    booking_id: String,
    user_id: Uuid,
    train_id: Uuid,
    passenger_name: String,
    passenger_age: i32,
    passenger_gender: String,
    journey_date: NaiveDate,
    seat_numbers: Vec<String>,
    coach: String,
    class_label: String,
    class_price: i64,
    total_amount: i64,
    status: String,
    created_at: DateTime<Utc>,
    train_name: String,
    train_number: String,
    departure_time: String,
    arrival_time: String,
    duration: String,
    from_name: String,
    from_code: String,
    from_city: String,
    to_name: String,
    to_code: String,
    to_city: String,
}

const JOIN_QUERY: &str = "SELECT \
        b.id, b.booking_id, b.user_id, b.train_id, \
        b.passenger_name, b.passenger_age, b.passenger_gender, \
        b.journey_date, b.seat_numbers, b.coach, b.class AS class_label, \
        b.class_price, b.total_amount, b.status, b.created_at, \
        t.name AS train_name, t.number AS train_number, \
        t.departure_time, t.arrival_time, t.duration, \
        fs.name AS from_name, fs.code AS from_code, fs.city AS from_city, \
        ts.name AS to_name, ts.code AS to_code, ts.city AS to_city \
     FROM bookings b \
     JOIN trains t ON b.train_id = t.id \
     JOIN stations fs ON t.from_station_id = fs.id \
     JOIN stations ts ON t.to_station_id = ts.id";

impl BookingJoinRow {
    fn into_view(self) -> Result<BookingWithJourney, BookingStoreError> {
        let pnr = Pnr::parse(&self.booking_id)
            .map_err(|e| BookingStoreError::Backend(Box::new(e)))?;

        Ok(BookingWithJourney {
            booking: Booking {
                id: self.id,
                record: BookingRecord {
                    pnr,
                    user_id: self.user_id,
                    train_id: self.train_id,
                    passenger: PassengerDetails {
                        name: Masked::new(self.passenger_name),
                        age: self.passenger_age,
                        gender: self.passenger_gender,
                    },
                    journey_date: self.journey_date,
                    seat_numbers: self.seat_numbers,
                    coach: self.coach,
                    class_label: self.class_label,
                    class_price: self.class_price,
                    total_amount: self.total_amount,
                },
                status: BookingStatus::from_str(&self.status),
                created_at: self.created_at,
            },
            train: TrainSummary {
                name: self.train_name,
                number: self.train_number,
                departure_time: self.departure_time,
                arrival_time: self.arrival_time,
                duration: self.duration,
            },
            from_station: StationSummary {
                name: self.from_name,
                code: self.from_code,
                city: self.from_city,
            },
            to_station: StationSummary {
                name: self.to_name,
                code: self.to_code,
                city: self.to_city,
            },
        })
    }
}

#[async_trait]
impl BookingStore for PostgresBookingStore {
    async fn insert_booking(&self, record: &BookingRecord) -> Result<Booking, BookingStoreError> {
        let mut tx = self.pool.begin().await.map_err(backend)?;

        // 1. Compare-and-swap on availability: flip only seats that are
        // still free. A concurrent booker who got here first wins.
        let updated = sqlx::query(
            "UPDATE seats SET is_available = FALSE \
             WHERE train_id = $1 AND coach = $2 AND seat_number = ANY($3) \
               AND is_available = TRUE",
        )
        .bind(record.train_id)
        .bind(&record.coach)
        .bind(&record.seat_numbers)
        .execute(&mut *tx)
        .await
        .map_err(backend)?
        .rows_affected() as usize;

        if updated != record.seat_numbers.len() {
            // Implicit rollback when tx drops; make it explicit anyway.
            let _ = tx.rollback().await;
            return Err(BookingStoreError::SeatsNoLongerAvailable {
                requested: record.seat_numbers.len(),
                updated,
            });
        }

        // 2. Persist the record itself
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        sqlx::query(
            "INSERT INTO bookings \
                (id, booking_id, user_id, train_id, passenger_name, passenger_age, \
                 passenger_gender, journey_date, seat_numbers, coach, class, \
                 class_price, total_amount, status, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)",
        )
        .bind(id)
        .bind(record.pnr.as_str())
        .bind(record.user_id)
        .bind(record.train_id)
        .bind(record.passenger.name.expose())
        .bind(record.passenger.age)
        .bind(&record.passenger.gender)
        .bind(record.journey_date)
        .bind(&record.seat_numbers)
        .bind(&record.coach)
        .bind(&record.class_label)
        .bind(record.class_price)
        .bind(record.total_amount)
        .bind(BookingStatus::Confirmed.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                BookingStoreError::DuplicatePnr(record.pnr.to_string())
            }
            _ => backend(e),
        })?;

        // 3. Both writes or neither
        tx.commit().await.map_err(backend)?;

        tracing::info!("Booking persisted: {} ({} seats)", record.pnr, updated);

        Ok(Booking {
            id,
            record: record.clone(),
            status: BookingStatus::Confirmed,
            created_at,
        })
    }

    async fn find_by_pnr(
        &self,
        pnr: &Pnr,
    ) -> Result<Option<BookingWithJourney>, BookingStoreError> {
        let row = sqlx::query_as::<_, BookingJoinRow>(&format!(
            "{JOIN_QUERY} WHERE b.booking_id = $1"
        ))
        .bind(pnr.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(BookingJoinRow::into_view).transpose()
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<BookingWithJourney>, BookingStoreError> {
        let rows = sqlx::query_as::<_, BookingJoinRow>(&format!(
            "{JOIN_QUERY} WHERE b.user_id = $1 ORDER BY b.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(BookingJoinRow::into_view).collect()
    }
}
