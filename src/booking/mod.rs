//! MedSpace Bookings
//!
//! The only entity with a lifecycle:
//!
//! - **types**: `Booking`, `BookableItem`, `BookingRequest`
//! - **ledger**: Submission and cancellation rules over an in-memory list
//! - **store**: The ledger persisted as one JSON array in a `KeyValueStore`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medspace::booking::{resolve_item, BookingKind, BookingRequest, BookingStore};
//! use medspace::catalog::Catalog;
//! use medspace::storage::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::seeded();
//!     let store = BookingStore::new(Arc::new(MemoryStore::new()));
//!
//!     let request = BookingRequest::new(BookingKind::Facility, 2)
//!         .date("2024-10-20")
//!         .time("09:00")
//!         .duration(3);
//!     let item = resolve_item(&catalog, &request)?;
//!     let booking = store.create(&request, item.as_ref()).await?;
//!     println!("Booked {} for ${}", booking.item_name, booking.total_price);
//!     Ok(())
//! }
//! ```

mod error;
mod ledger;
mod store;
mod types;

pub use error::{BookingError, BookingResult};
pub use ledger::{BookingLedger, BookingSummary};
pub use store::{resolve_item, BookingStore, Cancellation, BOOKINGS_KEY};
pub use types::{BookableItem, Booking, BookingKind, BookingRequest, BookingStatus};
