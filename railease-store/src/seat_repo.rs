use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use railease_catalog::catalog::SeatCatalog;
use railease_catalog::model::Seat;

pub struct PostgresSeatCatalog {
    pool: PgPool,
}

impl PostgresSeatCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct SeatRow {
    id: Uuid,
    train_id: Uuid,
    seat_number: String,
    coach: String,
    class_label: String,
    is_available: bool,
}

#[async_trait]
impl SeatCatalog for PostgresSeatCatalog {
    async fn fetch_seats(
        &self,
        train_id: Uuid,
        coach: &str,
    ) -> Result<Vec<Seat>, Box<dyn std::error::Error + Send + Sync>> {
        let rows = sqlx::query_as::<_, SeatRow>(
            "SELECT id, train_id, seat_number, coach, class AS class_label, is_available \
             FROM seats WHERE train_id = $1 AND coach = $2 ORDER BY seat_number",
        )
        .bind(train_id)
        .bind(coach)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Seat {
                id: row.id,
                train_id: row.train_id,
                seat_number: row.seat_number,
                coach: row.coach,
                class_label: row.class_label,
                is_available: row.is_available,
            })
            .collect())
    }
}
