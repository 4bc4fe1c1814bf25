use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct TrainSearchRequest {
    pub from_station_id: Uuid,
    pub to_station_id: Uuid,
    pub journey_date: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct TrainSearchResult {
    pub trains: Vec<TrainOption>,
}

#[derive(Debug, Serialize)]
pub struct TrainOption {
    pub train_id: Uuid,
    pub number: String,
    pub name: String,
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    pub base_price: i64,
    pub total_seats: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn search_request_deserializes() {
        let json = r#"
            {
                "from_station_id": "7b6d4c1e-4f5a-4d2b-9c3e-111122223333",
                "to_station_id": "7b6d4c1e-4f5a-4d2b-9c3e-444455556666",
                "journey_date": "2025-12-15"
            }
        "#;
        let req: TrainSearchRequest = serde_json::from_str(json).expect("Failed to deserialize");
        assert_eq!(req.journey_date.year(), 2025);
        assert_eq!(req.journey_date.weekday(), chrono::Weekday::Mon);
    }
}
