use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::model::Train;

/// Closed set of fare-class codes used by the pricing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClassCode {
    #[serde(rename = "1A")]
    AcFirst,
    #[serde(rename = "2A")]
    AcTwoTier,
    #[serde(rename = "3A")]
    AcThreeTier,
    #[serde(rename = "3E")]
    AcThreeTierEconomy,
    #[serde(rename = "SL")]
    Sleeper,
    #[serde(rename = "CC")]
    ChairCar,
    #[serde(rename = "EC")]
    ExecutiveChairCar,
    #[serde(rename = "2S")]
    SecondSitting,
}

impl ClassCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassCode::AcFirst => "1A",
            ClassCode::AcTwoTier => "2A",
            ClassCode::AcThreeTier => "3A",
            ClassCode::AcThreeTierEconomy => "3E",
            ClassCode::Sleeper => "SL",
            ClassCode::ChairCar => "CC",
            ClassCode::ExecutiveChairCar => "EC",
            ClassCode::SecondSitting => "2S",
        }
    }

    /// Parse a raw code string such as "3A".
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "1A" => Some(ClassCode::AcFirst),
            "2A" => Some(ClassCode::AcTwoTier),
            "3A" => Some(ClassCode::AcThreeTier),
            "3E" => Some(ClassCode::AcThreeTierEconomy),
            "SL" => Some(ClassCode::Sleeper),
            "CC" => Some(ClassCode::ChairCar),
            "EC" => Some(ClassCode::ExecutiveChairCar),
            "2S" => Some(ClassCode::SecondSitting),
            _ => None,
        }
    }

    /// Resolve a human-readable class label to its code. Unrecognized labels
    /// resolve to Sleeper; that is the documented default, not an error.
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "AC First Class" | "AC 1 Tier" => ClassCode::AcFirst,
            "AC Two-Tier" | "AC 2 Tier" => ClassCode::AcTwoTier,
            "AC Three-Tier" | "AC 3 Tier" => ClassCode::AcThreeTier,
            "AC Three-Tier Economy" | "AC 3 Tier Economy" => ClassCode::AcThreeTierEconomy,
            "Sleeper" => ClassCode::Sleeper,
            "Chair Car" => ClassCode::ChairCar,
            "Executive Chair Car" => ClassCode::ExecutiveChairCar,
            "Second Sitting" => ClassCode::SecondSitting,
            _ => ClassCode::Sleeper,
        }
    }
}

impl fmt::Display for ClassCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-class fares for one train. Built from the raw JSON column at the
/// store boundary; the rest of the system only ever sees the typed table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClassPriceTable {
    prices: BTreeMap<ClassCode, i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum PriceTableError {
    #[error("Price table must be a JSON object, got {0}")]
    NotAnObject(String),

    #[error("Unknown class code in price table: {0}")]
    UnknownClassCode(String),

    #[error("Fare for {code} is not a non-negative integer")]
    InvalidFare { code: String },
}

impl ClassPriceTable {
    pub fn new(prices: BTreeMap<ClassCode, i64>) -> Self {
        Self { prices }
    }

    /// Validate a raw `class_prices` JSON value into a typed table. Keys must
    /// be known class codes and values non-negative integers.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, PriceTableError> {
        let object = value
            .as_object()
            .ok_or_else(|| PriceTableError::NotAnObject(value.to_string()))?;

        let mut prices = BTreeMap::new();
        for (key, raw) in object {
            let code = ClassCode::from_code(key)
                .ok_or_else(|| PriceTableError::UnknownClassCode(key.clone()))?;
            let fare = raw
                .as_i64()
                .filter(|fare| *fare >= 0)
                .ok_or_else(|| PriceTableError::InvalidFare { code: key.clone() })?;
            prices.insert(code, fare);
        }
        Ok(Self { prices })
    }

    pub fn get(&self, code: ClassCode) -> Option<i64> {
        self.prices.get(&code).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

/// The fare charged per seat for the given class label on this train. Falls
/// back to the train's flat price when the table is absent or does not list
/// the resolved code. Never fails.
pub fn fare_per_seat(train: &Train, class_label: &str) -> i64 {
    let code = ClassCode::from_label(class_label);
    train
        .class_prices
        .as_ref()
        .and_then(|table| table.get(code))
        .unwrap_or(train.price)
}
