use axum::{extract::State, routing::post, Json, Router};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use railease_core::identity::{Claims, Role};

use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
struct GuestLoginRequest {
    #[serde(default = "default_role")]
    role: Role,
}

fn default_role() -> Role {
    Role::Passenger
}

#[derive(Debug, Serialize)]
struct AuthResponse {
    token: String,
    user_id: Uuid,
    role: Role,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/auth/guest", post(login_guest))
}

/// Issue a guest identity with the requested role. Account lifecycle beyond
/// token issuance lives with the identity provider, not here.
async fn login_guest(
    State(state): State<AppState>,
    Json(req): Json<GuestLoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let user_id = Uuid::new_v4();
    let claims = Claims {
        sub: user_id.to_string(),
        role: req.role,
        exp: (Utc::now() + Duration::seconds(state.auth.expiration as i64)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.auth.secret.as_bytes()),
    )
    .map_err(|e| AppError::InternalServerError(format!("Token encoding failed: {}", e)))?;

    Ok(Json(AuthResponse {
        token,
        user_id,
        role: req.role,
    }))
}
