//! MedSpace Storage
//!
//! Persistence for the only mutable state in the system, stored the way a
//! browser would keep it: whole JSON documents under string keys.
//!
//! - **kv**: `KeyValueStore` trait with file and in-memory backends
//! - **error**: Error types
//!
//! # Example
//!
//! ```rust,no_run
//! use medspace::storage::{FileStore, KeyValueStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = FileStore::open("./medspace_data").await?;
//!     store.set("medspaceBookings", "[]").await?;
//!     let raw = store.get("medspaceBookings").await?;
//!     assert_eq!(raw.as_deref(), Some("[]"));
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod kv;

pub use error::{StorageError, StorageResult};
pub use kv::{FileStore, KeyValueStore, MemoryStore};
