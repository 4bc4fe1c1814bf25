use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{CoreError, CoreResult};

/// Prefix carried by every rail PNR, e.g. `RE48210675`.
pub const PNR_PREFIX: &str = "RE";

/// Total PNR length including the prefix.
pub const PNR_LEN: usize = 10;

/// Passenger Name Record: the opaque booking identifier handed to the user
/// at confirmation and accepted back by the lookup endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pnr(String);

impl Pnr {
    /// Generate a fresh PNR: the `RE` prefix followed by random digits.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let mut code = String::with_capacity(PNR_LEN);
        code.push_str(PNR_PREFIX);
        for _ in 0..(PNR_LEN - PNR_PREFIX.len()) {
            code.push(char::from(b'0' + rng.gen_range(0..10u8)));
        }
        Pnr(code)
    }

    /// Accept a PNR supplied by the user, rejecting anything that does not
    /// match the issued format.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let trimmed = input.trim();
        if trimmed.len() != PNR_LEN {
            return Err(CoreError::ValidationError(format!(
                "PNR must be {} characters, got {}",
                PNR_LEN,
                trimmed.len()
            )));
        }
        if !trimmed.starts_with(PNR_PREFIX) {
            return Err(CoreError::ValidationError(format!(
                "PNR must start with {}",
                PNR_PREFIX
            )));
        }
        if !trimmed[PNR_PREFIX.len()..].bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::ValidationError(
                "PNR body must be numeric".to_string(),
            ));
        }
        Ok(Pnr(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pnr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate a short reference code with an arbitrary prefix. Used for the
/// cab-booking references which share the PNR shape but not the `RE` prefix.
pub fn generate_code(prefix: &str, digits: usize) -> String {
    let mut rng = rand::thread_rng();
    let mut code = String::with_capacity(prefix.len() + digits);
    code.push_str(prefix);
    for _ in 0..digits {
        code.push(char::from(b'0' + rng.gen_range(0..10u8)));
    }
    code
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_pnr_round_trips() {
        let pnr = Pnr::generate();
        assert_eq!(pnr.as_str().len(), PNR_LEN);
        assert!(pnr.as_str().starts_with(PNR_PREFIX));

        let parsed = Pnr::parse(pnr.as_str()).unwrap();
        assert_eq!(parsed, pnr);
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(Pnr::parse("RE1234").is_err()); // too short
        assert!(Pnr::parse("XX12345678").is_err()); // wrong prefix
        assert!(Pnr::parse("RE12A45678").is_err()); // non-numeric body
        assert!(Pnr::parse("  RE12345678  ").is_ok()); // whitespace tolerated
    }

    #[test]
    fn generate_code_has_prefix_and_length() {
        let code = generate_code("CB", 8);
        assert_eq!(code.len(), 10);
        assert!(code.starts_with("CB"));
        assert!(code[2..].bytes().all(|b| b.is_ascii_digit()));
    }
}
