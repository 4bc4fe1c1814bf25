pub mod catalog;
pub mod model;
pub mod pricing;
pub mod selection;

pub use catalog::{Directory, SeatCatalog};
pub use model::{BerthKind, Seat, Station, Train};
pub use pricing::{fare_per_seat, ClassCode, ClassPriceTable};
pub use selection::{SeatSelection, SeatStatus};
