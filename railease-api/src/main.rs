use std::net::SocketAddr;
use std::sync::Arc;

use railease_api::{
    app,
    state::{AppState, AuthConfig},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railease_api=debug,tower_http=debug,axum::rejection=trace".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = railease_store::app_config::Config::load().expect("Failed to load config");
    tracing::info!("Starting RailEase API on port {}", config.server.port);

    // Postgres Connection
    let pool = railease_store::connect(&config.database.url)
        .await
        .expect("Failed to connect to Postgres");
    railease_store::database::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    // Redis Connection
    let redis_client = railease_store::RedisClient::new(&config.redis.url)
        .await
        .expect("Failed to create Redis client");

    let app_state = AppState {
        directory: Arc::new(railease_store::PostgresDirectory::new(pool.clone())),
        seats: Arc::new(railease_store::PostgresSeatCatalog::new(pool.clone())),
        bookings: Arc::new(railease_store::PostgresBookingStore::new(pool.clone())),
        cab: Arc::new(railease_store::PostgresCabStore::new(pool)),
        redis: Arc::new(redis_client),
        auth: AuthConfig {
            secret: config.auth.jwt_secret.clone(),
            expiration: config.auth.jwt_expiration_seconds,
        },
        business_rules: config.business_rules.clone(),
    };

    let app = app(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
