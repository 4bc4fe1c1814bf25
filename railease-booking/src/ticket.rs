use std::fmt::Write;

use railease_catalog::model::BerthKind;

use crate::models::BookingWithJourney;

const RULE: &str =
    "================================================================";
const LINE: &str =
    "----------------------------------------------------------------";

/// Render the downloadable ticket for a confirmed booking. Fixed-layout
/// decoration over the booking/train/station join; no business logic, the
/// amounts are printed exactly as persisted.
pub fn render_ticket(view: &BookingWithJourney) -> String {
    let booking = &view.booking;
    let record = &booking.record;
    let base_fare = record.class_price * record.seat_numbers.len() as i64;
    let booking_fee = record.total_amount - base_fare;

    let mut out = String::new();
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, " RailEase");
    let _ = writeln!(out, " Premium Railway Booking Solution");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(
        out,
        " PNR: {:<22} STATUS: {}",
        record.pnr,
        record_status(view)
    );
    let _ = writeln!(out, "{LINE}");
    let _ = writeln!(out, " Journey Details");
    let _ = writeln!(out, "   Train:     {} ({})", view.train.name, view.train.number);
    let _ = writeln!(
        out,
        "   From:      {} ({}), {}",
        view.from_station.name, view.from_station.code, view.from_station.city
    );
    let _ = writeln!(
        out,
        "   To:        {} ({}), {}",
        view.to_station.name, view.to_station.code, view.to_station.city
    );
    let _ = writeln!(
        out,
        "   Departure: {:<10} Arrival: {:<10} Duration: {}",
        view.train.departure_time, view.train.arrival_time, view.train.duration
    );
    let _ = writeln!(
        out,
        "   Date:      {}",
        record.journey_date.format("%d %b %Y")
    );
    let _ = writeln!(out, "{LINE}");
    let _ = writeln!(out, " Passenger");
    let _ = writeln!(out, "   Name:   {}", record.passenger.name.expose());
    let _ = writeln!(
        out,
        "   Age:    {:<10} Gender: {}",
        record.passenger.age, record.passenger.gender
    );
    let _ = writeln!(out, "{LINE}");
    let _ = writeln!(out, " Seats");
    let _ = writeln!(out, "   Class:  {:<18} Coach: {}", record.class_label, record.coach);
    for number in &record.seat_numbers {
        let _ = writeln!(
            out,
            "   {:<14} {}",
            number,
            BerthKind::from_seat_number(number).label()
        );
    }
    let _ = writeln!(out, "{LINE}");
    let _ = writeln!(out, " Fare");
    let _ = writeln!(
        out,
        "   Base Fare ({} x Rs.{:<6}) Rs.{}",
        record.seat_numbers.len(),
        record.class_price,
        base_fare
    );
    let _ = writeln!(out, "   Booking Fee{:<16} Rs.{}", "", booking_fee);
    let _ = writeln!(out, "   Total Paid{:<17} Rs.{}", "", record.total_amount);
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, " Carry a valid ID proof while traveling.");
    let _ = writeln!(out, " Arrive at the station 30 minutes before departure.");
    let _ = writeln!(out, "{RULE}");
    out
}

fn record_status(view: &BookingWithJourney) -> String {
    view.booking.status.as_str().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Booking, BookingRecord, BookingStatus, PassengerDetails, StationSummary, TrainSummary,
    };
    use chrono::{NaiveDate, Utc};
    use railease_core::pnr::Pnr;
    use railease_shared::pii::Masked;
    use uuid::Uuid;

    fn sample() -> BookingWithJourney {
        BookingWithJourney {
            booking: Booking {
                id: Uuid::new_v4(),
                record: BookingRecord {
                    pnr: Pnr::parse("RE12345678").unwrap(),
                    user_id: Uuid::new_v4(),
                    train_id: Uuid::new_v4(),
                    passenger: PassengerDetails {
                        name: Masked::new("Asha Verma".to_string()),
                        age: 34,
                        gender: "female".to_string(),
                    },
                    journey_date: NaiveDate::from_ymd_opt(2025, 12, 15).unwrap(),
                    seat_numbers: vec!["S1-25-LB".to_string(), "S1-26-MB".to_string()],
                    coach: "S1".to_string(),
                    class_label: "Sleeper".to_string(),
                    class_price: 450,
                    total_amount: 950,
                },
                status: BookingStatus::Confirmed,
                created_at: Utc::now(),
            },
            train: TrainSummary {
                name: "Mumbai Rajdhani".to_string(),
                number: "12951".to_string(),
                departure_time: "16:55".to_string(),
                arrival_time: "08:35".to_string(),
                duration: "15h 40m".to_string(),
            },
            from_station: StationSummary {
                name: "New Delhi".to_string(),
                code: "NDLS".to_string(),
                city: "Delhi".to_string(),
            },
            to_station: StationSummary {
                name: "Mumbai Central".to_string(),
                code: "MMCT".to_string(),
                city: "Mumbai".to_string(),
            },
        }
    }

    #[test]
    fn ticket_carries_pnr_seats_and_totals() {
        let ticket = render_ticket(&sample());
        assert!(ticket.contains("RE12345678"));
        assert!(ticket.contains("CONFIRMED"));
        assert!(ticket.contains("S1-25-LB"));
        assert!(ticket.contains("Lower Berth"));
        assert!(ticket.contains("Middle Berth"));
        assert!(ticket.contains("Rs.900"));
        assert!(ticket.contains("Rs.50"));
        assert!(ticket.contains("Rs.950"));
        assert!(ticket.contains("Mumbai Rajdhani"));
        assert!(ticket.contains("NDLS"));
    }

    #[test]
    fn fee_line_is_total_minus_base() {
        let mut view = sample();
        view.booking.record.total_amount = 1000;
        let ticket = render_ticket(&view);
        assert!(ticket.contains("Rs.100"));
    }

    #[test]
    fn real_passenger_name_appears_despite_masking() {
        let ticket = render_ticket(&sample());
        assert!(ticket.contains("Asha Verma"));
        assert!(!ticket.contains("********"));
    }
}
