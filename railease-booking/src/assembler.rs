use chrono::NaiveDate;
use railease_core::pnr::Pnr;
use railease_shared::pii::Masked;
use uuid::Uuid;

use crate::models::{BookingRecord, PassengerDetails};

/// Session state gathered across the booking flow, all optional until the
/// moment of assembly.
#[derive(Debug, Default, Clone)]
pub struct BookingDraft {
    pub pnr: Option<Pnr>,
    pub user_id: Option<Uuid>,
    pub train_id: Option<Uuid>,
    pub passenger_name: Option<String>,
    /// Free-text age field exactly as captured from the form.
    pub passenger_age: Option<String>,
    pub passenger_gender: Option<String>,
    pub journey_date: Option<NaiveDate>,
    pub seat_numbers: Vec<String>,
    pub coach: Option<String>,
    pub class_label: Option<String>,
    pub class_price: Option<i64>,
    pub total_amount: Option<i64>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssemblyError {
    #[error("Missing booking field: {0}")]
    MissingField(&'static str),
}

/// Produce the persisted record from the draft, or refuse without a write.
/// Every required field must be present; the free-text age must parse as a
/// positive number, anything else counts as the field being missing.
pub fn assemble(draft: BookingDraft) -> Result<BookingRecord, AssemblyError> {
    let pnr = draft.pnr.ok_or(AssemblyError::MissingField("pnr"))?;
    let user_id = draft.user_id.ok_or(AssemblyError::MissingField("user_id"))?;
    let train_id = draft
        .train_id
        .ok_or(AssemblyError::MissingField("train_id"))?;
    let journey_date = draft
        .journey_date
        .ok_or(AssemblyError::MissingField("journey_date"))?;

    let name = required_text(draft.passenger_name, "passenger_name")?;
    let gender = required_text(draft.passenger_gender, "passenger_gender")?;
    let age = draft
        .passenger_age
        .as_deref()
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .and_then(|raw| raw.parse::<i32>().ok())
        .filter(|age| *age > 0)
        .ok_or(AssemblyError::MissingField("passenger_age"))?;

    if draft.seat_numbers.is_empty() {
        return Err(AssemblyError::MissingField("seat_numbers"));
    }
    let coach = required_text(draft.coach, "coach")?;
    let class_label = required_text(draft.class_label, "class")?;
    let class_price = draft
        .class_price
        .ok_or(AssemblyError::MissingField("class_price"))?;
    let total_amount = draft
        .total_amount
        .ok_or(AssemblyError::MissingField("total_amount"))?;

    Ok(BookingRecord {
        pnr,
        user_id,
        train_id,
        passenger: PassengerDetails {
            name: Masked::new(name),
            age,
            gender,
        },
        journey_date,
        seat_numbers: draft.seat_numbers,
        coach,
        class_label,
        class_price,
        total_amount,
    })
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, AssemblyError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(AssemblyError::MissingField(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> BookingDraft {
        BookingDraft {
            pnr: Some(Pnr::generate()),
            user_id: Some(Uuid::new_v4()),
            train_id: Some(Uuid::new_v4()),
            passenger_name: Some("Asha Verma".to_string()),
            passenger_age: Some("34".to_string()),
            passenger_gender: Some("female".to_string()),
            journey_date: NaiveDate::from_ymd_opt(2025, 12, 15),
            seat_numbers: vec!["S1-25-LB".to_string(), "S1-26-MB".to_string()],
            coach: Some("S1".to_string()),
            class_label: Some("Sleeper".to_string()),
            class_price: Some(450),
            total_amount: Some(950),
        }
    }

    #[test]
    fn complete_draft_assembles() {
        let record = assemble(complete_draft()).unwrap();
        assert_eq!(record.passenger.age, 34);
        assert_eq!(record.seat_numbers.len(), 2);
        assert_eq!(record.total_amount, 950);
    }

    #[test]
    fn non_numeric_age_is_a_missing_field() {
        let mut draft = complete_draft();
        draft.passenger_age = Some("thirty four".to_string());
        assert_eq!(
            assemble(draft),
            Err(AssemblyError::MissingField("passenger_age"))
        );
    }

    #[test]
    fn negative_or_zero_age_is_rejected() {
        for bad in ["0", "-3"] {
            let mut draft = complete_draft();
            draft.passenger_age = Some(bad.to_string());
            assert_eq!(
                assemble(draft),
                Err(AssemblyError::MissingField("passenger_age"))
            );
        }
    }

    #[test]
    fn age_with_surrounding_whitespace_parses() {
        let mut draft = complete_draft();
        draft.passenger_age = Some(" 41 ".to_string());
        assert_eq!(assemble(draft).unwrap().passenger.age, 41);
    }

    #[test]
    fn empty_seat_list_blocks_assembly() {
        let mut draft = complete_draft();
        draft.seat_numbers.clear();
        assert_eq!(
            assemble(draft),
            Err(AssemblyError::MissingField("seat_numbers"))
        );
    }

    #[test]
    fn blank_name_blocks_assembly() {
        let mut draft = complete_draft();
        draft.passenger_name = Some("   ".to_string());
        assert_eq!(
            assemble(draft),
            Err(AssemblyError::MissingField("passenger_name"))
        );
    }

    #[test]
    fn each_required_field_is_checked() {
        let mut draft = complete_draft();
        draft.journey_date = None;
        assert_eq!(
            assemble(draft),
            Err(AssemblyError::MissingField("journey_date"))
        );

        let mut draft = complete_draft();
        draft.user_id = None;
        assert_eq!(assemble(draft), Err(AssemblyError::MissingField("user_id")));

        let mut draft = complete_draft();
        draft.total_amount = None;
        assert_eq!(
            assemble(draft),
            Err(AssemblyError::MissingField("total_amount"))
        );
    }
}
