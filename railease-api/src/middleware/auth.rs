use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use railease_core::identity::{Claims, Role, SessionContext};

use crate::error::AppError;
use crate::state::AppState;

/// Decode the bearer token, check the role, and inject a SessionContext into
/// the request. The session is the only identity handlers ever see; there is
/// no ambient auth state.
fn authenticate(state: &AppState, req: &Request, expected: Role) -> Result<SessionContext, AppError> {
    // 1. Extract token from Authorization header
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::AuthenticationError("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::AuthenticationError("Expected a bearer token".to_string()))?;

    // 2. Decode and validate JWT
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.auth.secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| AppError::AuthenticationError(e.to_string()))?;

    // 3. Check role
    if token_data.claims.role != expected {
        return Err(AppError::AuthorizationError(format!(
            "This endpoint requires the {} role",
            expected.as_str()
        )));
    }

    // 4. Resolve claims into an explicit session
    SessionContext::from_claims(&token_data.claims)
        .map_err(|e| AppError::AuthenticationError(e.to_string()))
}

pub async fn passenger_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = authenticate(&state, &req, Role::Passenger)?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

pub async fn driver_auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let session = authenticate(&state, &req, Role::Driver)?;
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}
