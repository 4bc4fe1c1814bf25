use axum::{
    extract::{ConnectInfo, State},
    http::Method,
    response::IntoResponse,
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod bookings;
pub mod cab;
pub mod error;
pub mod middleware;
pub mod search;
pub mod seats;
pub mod state;
pub mod stations;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    let public = Router::new()
        .merge(auth::routes())
        .merge(stations::routes())
        .merge(search::routes())
        .merge(seats::routes())
        .merge(bookings::public_routes());

    let passenger = Router::new()
        .merge(bookings::routes())
        .merge(cab::passenger_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::passenger_auth_middleware,
        ));

    let driver = Router::new()
        .merge(cab::driver_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::driver_auth_middleware,
        ));

    Router::new()
        .merge(public)
        .merge(passenger)
        .merge(driver)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, impl IntoResponse> {
    // Peer address is only present when served with connect info; without it
    // (e.g. in-process tests) there is nothing to key the counter on.
    let peer_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    let Some(ip) = peer_ip else {
        return Ok(next.run(req).await);
    };

    let key = format!("ratelimit:{}", ip);

    match state.redis.check_rate_limit(&key, 100, 60).await {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((axum::http::StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")),
        Err(_) => Ok(next.run(req).await), // Fail open
    }
}
