pub mod dispatch;
pub mod models;
pub mod store;

pub use dispatch::CabError;
pub use models::{CabBooking, CabStatus, DriverProfile};
pub use store::{CabStore, CabStoreError};
