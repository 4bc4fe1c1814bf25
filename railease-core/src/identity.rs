use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Roles issued by the identity service. Mirrors the two account kinds the
/// product knows about: rail passengers and cab drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Passenger,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Passenger => "PASSENGER",
            Role::Driver => "DRIVER",
        }
    }
}

/// JWT claims carried by every authenticated request.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub role: Role,
    pub exp: usize,
}

/// The authenticated identity for one request, resolved from the claims by
/// the auth middleware and threaded explicitly through handlers. There is no
/// ambient session state: anything that needs the caller's identity takes
/// this context as input.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub user_id: Uuid,
    pub role: Role,
}

impl SessionContext {
    /// Resolve verified claims into a session. Fails when the subject is not
    /// a well-formed user id.
    pub fn from_claims(claims: &Claims) -> Result<Self, crate::CoreError> {
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            crate::CoreError::ValidationError("Token subject is not a user id".to_string())
        })?;
        Ok(SessionContext {
            user_id,
            role: claims.role,
        })
    }
}
