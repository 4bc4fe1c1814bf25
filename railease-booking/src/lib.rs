pub mod assembler;
pub mod models;
pub mod store;
pub mod summary;
pub mod ticket;

pub use assembler::{assemble, AssemblyError, BookingDraft};
pub use models::{
    Booking, BookingRecord, BookingStatus, BookingWithJourney, PassengerDetails, StationSummary,
    TrainSummary,
};
pub use store::{BookingStore, BookingStoreError};
pub use summary::{summarize, BookingSummary};
pub use ticket::render_ticket;
