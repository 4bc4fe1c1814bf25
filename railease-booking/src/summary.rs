use serde::{Deserialize, Serialize};

/// Cost breakdown shown on the review screen and persisted at commit. Both
/// paths call `summarize`, so the displayed and stored totals cannot drift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub seat_count: u32,
    pub fare_per_seat: i64,
    pub base_fare: i64,
    pub booking_fee: i64,
    pub total_amount: i64,
}

/// `total = seats × fare + fee`. The fee applies exactly once per booking
/// regardless of seat count; an empty selection yields the fee alone. The
/// calculator does not enforce a minimum seat count, callers do.
pub fn summarize(seat_count: u32, fare_per_seat: i64, booking_fee: i64) -> BookingSummary {
    let base_fare = i64::from(seat_count) * fare_per_seat;
    BookingSummary {
        seat_count,
        fare_per_seat,
        base_fare,
        booking_fee,
        total_amount: base_fare + booking_fee,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_is_count_times_fare_plus_fee() {
        let summary = summarize(2, 450, 50);
        assert_eq!(summary.base_fare, 900);
        assert_eq!(summary.total_amount, 950);
    }

    #[test]
    fn empty_selection_pays_only_the_fee() {
        let summary = summarize(0, 450, 50);
        assert_eq!(summary.base_fare, 0);
        assert_eq!(summary.total_amount, 50);
    }

    #[test]
    fn fee_applies_once_regardless_of_seat_count() {
        for count in 1..=6u32 {
            let summary = summarize(count, 300, 50);
            assert_eq!(summary.total_amount, i64::from(count) * 300 + 50);
        }
    }

    #[test]
    fn zero_fare_is_valid() {
        let summary = summarize(3, 0, 50);
        assert_eq!(summary.total_amount, 50);
    }

    /// The whole review-screen computation over a real coach: toggle two of
    /// three seats, check the per-seat statuses, price the selection.
    #[test]
    fn selection_to_total_scenario() {
        use railease_catalog::model::Seat;
        use railease_catalog::selection::{SeatSelection, SeatStatus};
        use uuid::Uuid;

        let train_id = Uuid::new_v4();
        let seat = |number: &str, available: bool| Seat {
            id: Uuid::new_v4(),
            train_id,
            seat_number: number.to_string(),
            coach: "S1".to_string(),
            class_label: "Sleeper".to_string(),
            is_available: available,
        };
        let catalog = vec![seat("S1-1", true), seat("S1-2", false), seat("S1-3", true)];

        let mut selection = SeatSelection::new("S1", "Sleeper");
        selection.toggle("S1-1", &catalog);
        selection.toggle("S1-3", &catalog);

        let statuses: Vec<SeatStatus> =
            catalog.iter().map(|s| selection.status_of(s)).collect();
        assert_eq!(
            statuses,
            [SeatStatus::Selected, SeatStatus::Booked, SeatStatus::Selected]
        );

        let summary = summarize(selection.len() as u32, 450, 50);
        assert_eq!(summary.total_amount, 950);
    }
}
