//! # MedSpace
//!
//! A full-stack Rust marketplace where practitioners book hospital facilities
//! and medical equipment, paired with a CRM portal for pharmaceutical sales reps.
//!
//! ## Features
//!
//! - **Marketplace**: Browse partner hospitals, facilities (per hour) and equipment (per day)
//! - **Bookings**: Validated, persisted bookings with cancel and CSV/JSON export
//! - **Pharma portal**: HCPs, visits, follow-up tasks, and the product catalog
//! - **Real-time**: WebSocket notifications when bookings change
//!
//! ## Modules
//!
//! - [`catalog`]: Seeded read-only records, search, and filters
//! - [`booking`]: Booking validation, the ledger, and its persistent store
//! - [`storage`]: Key-value persistence backends
//! - [`api`]: REST API server with Axum
//! - [`websocket`]: Booking notifications over WebSocket
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use medspace::booking::{BookingKind, BookingRequest, BookingStore, resolve_item};
//! use medspace::catalog::Catalog;
//! use medspace::storage::MemoryStore;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let catalog = Catalog::seeded();
//!     let store = BookingStore::new(Arc::new(MemoryStore::new()));
//!
//!     // Two hours in the MRI unit
//!     let request = BookingRequest::new(BookingKind::Facility, 2)
//!         .date("2024-11-04")
//!         .time("09:30")
//!         .duration(2);
//!     let item = resolve_item(&catalog, &request)?;
//!     let booking = store.create(&request, item.as_ref()).await?;
//!
//!     println!("Booked {} for ${}", booking.item_name, booking.total_price);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod booking;
pub mod catalog;
pub mod config;
pub mod storage;
pub mod websocket;

// Re-export top-level types for convenience
pub use booking::{
    Booking, BookingError, BookingKind, BookingLedger, BookingRequest, BookingResult,
    BookingStatus, BookingStore, BookingSummary,
};

pub use catalog::{Catalog, Equipment, Facility, Hcp, Hospital, Product, Task, Visit};

pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, StorageResult};

pub use api::{build_router, serve, ApiConfig, ApiError, AppState};

pub use config::Config;

pub use websocket::{ClientMessage, ConnectionHub, ServerMessage, WsEvent};
