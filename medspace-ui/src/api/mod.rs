//! MedSpace API access
//!
//! - **types**: JSON shapes returned by the server
//! - **client**: `gloo-net` calls, each returning `Result<T, String>`

pub mod client;
pub mod types;

pub use client::*;
pub use types::*;
