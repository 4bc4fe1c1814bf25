use async_trait::async_trait;
use chrono::Weekday;
use sqlx::PgPool;
use uuid::Uuid;

use railease_catalog::catalog::Directory;
use railease_catalog::model::{Station, Train};
use railease_catalog::pricing::ClassPriceTable;

pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal structs for type-safe querying
#[derive(sqlx::FromRow)]
struct StationRow {
    id: Uuid,
    name: String,
    code: String,
    city: String,
    state: String,
}

#[derive(sqlx::FromRow)]
struct TrainRow {
    id: Uuid,
    number: String,
    name: String,
    from_station_id: Uuid,
    to_station_id: Uuid,
    departure_time: String,
    arrival_time: String,
    duration: String,
    price: i64,
    total_seats: i32,
    operating_days: Option<Vec<String>>,
    class_prices: Option<serde_json::Value>,
}

impl TrainRow {
    /// This is the boundary where train data enters the system: the raw
    /// `class_prices` JSON becomes a typed table here or not at all. An
    /// invalid table degrades to the flat price rather than failing the
    /// whole search.
    fn into_train(self) -> Train {
        let class_prices = self.class_prices.as_ref().and_then(|raw| {
            match ClassPriceTable::from_json(raw) {
                Ok(table) if !table.is_empty() => Some(table),
                Ok(_) => None,
                Err(e) => {
                    tracing::warn!("Train {} has an invalid class_prices table: {}", self.id, e);
                    None
                }
            }
        });

        Train {
            id: self.id,
            number: self.number,
            name: self.name,
            from_station_id: self.from_station_id,
            to_station_id: self.to_station_id,
            departure_time: self.departure_time,
            arrival_time: self.arrival_time,
            duration: self.duration,
            price: self.price,
            total_seats: self.total_seats,
            operating_days: self.operating_days.unwrap_or_default(),
            class_prices,
        }
    }
}

const TRAIN_COLUMNS: &str = "id, number, name, from_station_id, to_station_id, \
     departure_time, arrival_time, duration, price, total_seats, operating_days, class_prices";

#[async_trait]
impl Directory for PostgresDirectory {
    async fn fetch_stations(
        &self,
    ) -> Result<Vec<Station>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, StationRow>(
            "SELECT id, name, code, city, state FROM stations ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Station {
                id: row.id,
                name: row.name,
                code: row.code,
                city: row.city,
                state: row.state,
            })
            .collect())
    }

    async fn search_trains(
        &self,
        from_station_id: Uuid,
        to_station_id: Uuid,
        weekday: Weekday,
    ) -> Result<Vec<Train>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, TrainRow>(&format!(
            "SELECT {TRAIN_COLUMNS} FROM trains \
             WHERE from_station_id = $1 AND to_station_id = $2 ORDER BY departure_time"
        ))
        .bind(from_station_id)
        .bind(to_station_id)
        .fetch_all(&self.pool)
        .await?;

        // Weekday membership is checked here rather than in SQL so the
        // stored day names keep their free-text tolerance.
        Ok(rows
            .into_iter()
            .map(TrainRow::into_train)
            .filter(|train| train.operates_on(weekday))
            .collect())
    }

    async fn get_train(
        &self,
        train_id: Uuid,
    ) -> Result<Option<Train>, Box<dyn std::error::Error + Send + Sync>> {
        let row = sqlx::query_as::<_, TrainRow>(&format!(
            "SELECT {TRAIN_COLUMNS} FROM trains WHERE id = $1"
        ))
        .bind(train_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TrainRow::into_train))
    }
}
