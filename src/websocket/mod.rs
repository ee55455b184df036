//! Live booking events
//!
//! Browser tabs and other listeners connect to `/api/v1/ws`, follow one or
//! more booking topics, and receive every confirmed or cancelled booking as
//! it is written. Lists stay current without polling.
//!
//! `hub` owns the socket registry, `handler` runs each socket, and
//! `messages` is the JSON protocol.
//!
//! ## Topics
//!
//! | Topic | Receives |
//! |---|---|
//! | `bookings`, `bookings.*` | every booking event |
//! | `bookings.facility` | facility bookings only |
//! | `bookings.equipment` | equipment rentals only |
//!
//! ## Protocol
//!
//! ```text
//! → {"type":"subscribe","topics":["bookings"]}
//! ← {"type":"subscribed","topics":["bookings"]}
//! ← {"type":"booking_created","booking":{"id":1729080000000,"type":"facility",...}}
//! → {"type":"ping"}
//! ← {"type":"pong"}
//! ```

mod handler;
mod hub;
mod messages;

pub use handler::websocket_handler;
pub use hub::{ConnectionHub, ConnectionId, HubConfig, HubError, TopicChange};
pub use messages::{ClientMessage, ServerMessage, WsEvent, BOOKINGS_TOPIC};
