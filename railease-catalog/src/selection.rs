use serde::{Deserialize, Serialize};

use crate::model::Seat;

/// Display status of a single seat, combining the catalog's availability
/// flag with the user's current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Available,
    Booked,
    Selected,
}

/// The ordered set of seats the user currently wants to buy, scoped to one
/// train+coach+class context. Seat numbers are only meaningful within that
/// context, so switching coach or class discards everything.
///
/// Purely local, synchronous state: the catalog slice passed in is the
/// per-session copy fetched on the last coach/class change.
#[derive(Debug, Clone, Default)]
pub struct SeatSelection {
    coach: String,
    class_label: String,
    seats: Vec<String>,
}

impl SeatSelection {
    pub fn new(coach: impl Into<String>, class_label: impl Into<String>) -> Self {
        Self {
            coach: coach.into(),
            class_label: class_label.into(),
            seats: Vec::new(),
        }
    }

    pub fn coach(&self) -> &str {
        &self.coach
    }

    pub fn class_label(&self) -> &str {
        &self.class_label
    }

    /// Selected seat numbers in the order they were toggled on.
    pub fn seat_numbers(&self) -> &[String] {
        &self.seats
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    /// Toggle a seat. A seat that is absent from the catalog or not
    /// available is silently ignored: the UI should never offer it, but the
    /// reducer stays defensive. An available seat is removed if already
    /// selected, otherwise appended at the end.
    pub fn toggle(&mut self, seat_number: &str, catalog: &[Seat]) {
        let selectable = catalog
            .iter()
            .any(|seat| seat.seat_number == seat_number && seat.is_available);
        if !selectable {
            return;
        }

        if let Some(pos) = self.seats.iter().position(|s| s == seat_number) {
            self.seats.remove(pos);
        } else {
            self.seats.push(seat_number.to_string());
        }
    }

    /// Status of a catalog seat for display. A booked seat reports Booked
    /// regardless of selection; Selected takes precedence over Available.
    pub fn status_of(&self, seat: &Seat) -> SeatStatus {
        if !seat.is_available {
            SeatStatus::Booked
        } else if self.seats.iter().any(|s| *s == seat.seat_number) {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }

    /// Drop selected seats that are no longer present-and-available in the
    /// latest catalog fetch. Called by the owner whenever the catalog is
    /// refreshed.
    pub fn reconcile(&mut self, catalog: &[Seat]) {
        self.seats.retain(|number| {
            catalog
                .iter()
                .any(|seat| seat.seat_number == *number && seat.is_available)
        });
    }

    /// Switch to a different coach/class context. Any prior selection is
    /// cleared even when seat numbers collide between coaches.
    pub fn set_context(&mut self, coach: impl Into<String>, class_label: impl Into<String>) {
        let coach = coach.into();
        let class_label = class_label.into();
        if coach != self.coach || class_label != self.class_label {
            self.seats.clear();
        }
        self.coach = coach;
        self.class_label = class_label;
    }
}
