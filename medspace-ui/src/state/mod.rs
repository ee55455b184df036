//! State Management
//!
//! Global application state, the "Book Now" session handoff, and the
//! WebSocket connection.

pub mod global;
pub mod selection;
pub mod websocket;

pub use global::{provide_global_state, GlobalState, Notice, NoticeVariant, PortalMode};
pub use selection::Selection;
