pub mod app_config;
pub mod booking_repo;
pub mod cab_repo;
pub mod database;
pub mod directory_repo;
pub mod redis_repo;
pub mod seat_repo;

pub use booking_repo::PostgresBookingStore;
pub use cab_repo::PostgresCabStore;
pub use database::connect;
pub use directory_repo::PostgresDirectory;
pub use redis_repo::RedisClient;
pub use seat_repo::PostgresSeatCatalog;
