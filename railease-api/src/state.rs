use std::sync::Arc;

use railease_booking::store::BookingStore;
use railease_cab::store::CabStore;
use railease_catalog::catalog::{Directory, SeatCatalog};
use railease_store::app_config::BusinessRules;
use railease_store::RedisClient;

#[derive(Clone)]
pub struct AuthConfig {
    pub secret: String,
    pub expiration: u64,
}

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<dyn Directory>,
    pub seats: Arc<dyn SeatCatalog>,
    pub bookings: Arc<dyn BookingStore>,
    pub cab: Arc<dyn CabStore>,
    pub redis: Arc<RedisClient>,
    pub auth: AuthConfig,
    pub business_rules: BusinessRules,
}
