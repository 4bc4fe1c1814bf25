use chrono::Weekday;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::pricing::ClassPriceTable;

/// A station in the network. Reference data: created by an administrator out
/// of band and never mutated by the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Station {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub city: String,
    pub state: String,
}

/// A scheduled train service between two stations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Train {
    pub id: Uuid,
    pub number: String,
    pub name: String,
    pub from_station_id: Uuid,
    pub to_station_id: Uuid,
    /// Local time-of-day strings as published in the timetable, e.g. "16:55".
    pub departure_time: String,
    pub arrival_time: String,
    pub duration: String,
    /// Flat fare applied when no per-class table covers the selected class.
    pub price: i64,
    pub total_seats: i32,
    /// Weekday names as stored, e.g. ["Mon", "Wed", "Fri"]. Empty means the
    /// service runs daily.
    pub operating_days: Vec<String>,
    pub class_prices: Option<ClassPriceTable>,
}

impl Train {
    /// Whether this service runs on the given weekday.
    pub fn operates_on(&self, weekday: Weekday) -> bool {
        if self.operating_days.is_empty() {
            return true;
        }
        self.operating_days
            .iter()
            .any(|day| parse_weekday(day) == Some(weekday))
    }
}

fn parse_weekday(input: &str) -> Option<Weekday> {
    match input.trim().to_ascii_lowercase().as_str() {
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tues" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thur" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        "sun" | "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

/// One seat in one coach of one train. Seat numbers are unique only within a
/// coach; the berth kind is encoded in the number itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub id: Uuid,
    pub train_id: Uuid,
    pub seat_number: String,
    pub coach: String,
    #[serde(rename = "class")]
    pub class_label: String,
    pub is_available: bool,
}

impl Seat {
    pub fn berth_kind(&self) -> BerthKind {
        BerthKind::from_seat_number(&self.seat_number)
    }
}

/// Physical berth position, decoded from the `LB/MB/UB/SL/SU` marker inside
/// a seat number (e.g. `S1-12-UB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BerthKind {
    LowerBerth,
    MiddleBerth,
    UpperBerth,
    SideLower,
    SideUpper,
    Seat,
}

impl BerthKind {
    pub fn from_seat_number(seat_number: &str) -> Self {
        // SL/SU are checked before the berth markers so a side berth is
        // never misread; LB/MB/UB cannot collide with each other.
        if seat_number.contains("SL") {
            BerthKind::SideLower
        } else if seat_number.contains("SU") {
            BerthKind::SideUpper
        } else if seat_number.contains("LB") {
            BerthKind::LowerBerth
        } else if seat_number.contains("MB") {
            BerthKind::MiddleBerth
        } else if seat_number.contains("UB") {
            BerthKind::UpperBerth
        } else {
            BerthKind::Seat
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BerthKind::LowerBerth => "Lower Berth",
            BerthKind::MiddleBerth => "Middle Berth",
            BerthKind::UpperBerth => "Upper Berth",
            BerthKind::SideLower => "Side Lower",
            BerthKind::SideUpper => "Side Upper",
            BerthKind::Seat => "Seat",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn train(days: &[&str]) -> Train {
        Train {
            id: Uuid::new_v4(),
            number: "12951".to_string(),
            name: "Mumbai Rajdhani".to_string(),
            from_station_id: Uuid::new_v4(),
            to_station_id: Uuid::new_v4(),
            departure_time: "16:55".to_string(),
            arrival_time: "08:35".to_string(),
            duration: "15h 40m".to_string(),
            price: 450,
            total_seats: 72,
            operating_days: days.iter().map(|d| d.to_string()).collect(),
            class_prices: None,
        }
    }

    #[test]
    fn operating_day_membership() {
        let t = train(&["Mon", "wednesday", "FRI"]);
        assert!(t.operates_on(Weekday::Mon));
        assert!(t.operates_on(Weekday::Wed));
        assert!(t.operates_on(Weekday::Fri));
        assert!(!t.operates_on(Weekday::Tue));
        assert!(!t.operates_on(Weekday::Sun));
    }

    #[test]
    fn empty_operating_days_means_daily() {
        let t = train(&[]);
        assert!(t.operates_on(Weekday::Sun));
    }

    #[test]
    fn berth_markers_decode() {
        assert_eq!(BerthKind::from_seat_number("S1-12-LB"), BerthKind::LowerBerth);
        assert_eq!(BerthKind::from_seat_number("S1-13-MB"), BerthKind::MiddleBerth);
        assert_eq!(BerthKind::from_seat_number("S1-14-UB"), BerthKind::UpperBerth);
        assert_eq!(BerthKind::from_seat_number("S1-15-SL"), BerthKind::SideLower);
        assert_eq!(BerthKind::from_seat_number("S1-16-SU"), BerthKind::SideUpper);
        assert_eq!(BerthKind::from_seat_number("D2-44"), BerthKind::Seat);
    }
}
