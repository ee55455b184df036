//! WebSocket Message Types
//!
//! Defines all message types for WebSocket communication between
//! browser clients and the MedSpace server.

use serde::{Deserialize, Serialize};

use crate::booking::Booking;

/// Topic carrying every booking event
pub const BOOKINGS_TOPIC: &str = "bookings";

/// Messages sent from client to server
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Subscribe to topics for real-time updates
    Subscribe {
        /// Topics to subscribe to (e.g., "bookings", "bookings.facility")
        topics: Vec<String>,
    },
    /// Unsubscribe from topics
    Unsubscribe { topics: Vec<String> },
    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// A booking was confirmed
    BookingCreated { booking: Booking },
    /// A booking's status flipped to cancelled
    BookingCancelled { booking: Booking },
    /// Subscription confirmed
    Subscribed { topics: Vec<String> },
    /// Unsubscription confirmed
    Unsubscribed { topics: Vec<String> },
    /// Pong response to ping
    Pong,
    Error { message: String },
    /// Connection established
    Connected { connection_id: String },
}

/// Internal event published through the hub
#[derive(Debug, Clone)]
pub struct WsEvent {
    /// Topic this event belongs to (e.g., "bookings.equipment")
    pub topic: String,
    /// The message to send to subscribers
    pub message: ServerMessage,
}

impl WsEvent {
    pub fn booking_created(booking: &Booking) -> Self {
        Self {
            topic: booking_topic(booking),
            message: ServerMessage::BookingCreated {
                booking: booking.clone(),
            },
        }
    }

    pub fn booking_cancelled(booking: &Booking) -> Self {
        Self {
            topic: booking_topic(booking),
            message: ServerMessage::BookingCancelled {
                booking: booking.clone(),
            },
        }
    }
}

fn booking_topic(booking: &Booking) -> String {
    format!("{}.{}", BOOKINGS_TOPIC, booking.kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingKind, BookingStatus};
    use chrono::{NaiveDate, Utc};

    fn booking() -> Booking {
        Booking {
            id: 1_729_080_000_000,
            kind: BookingKind::Equipment,
            item_id: 2,
            item_name: "Surgical Microscope".to_string(),
            hospital_name: "City Medical Center".to_string(),
            location: "Los Angeles, CA".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 10, 20).unwrap(),
            start_time: "08:00".to_string(),
            duration: 4,
            total_price: 2000,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_client_message_deserialize_subscribe() {
        let json = r#"{"type": "subscribe", "topics": ["bookings", "bookings.facility"]}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::Subscribe { topics } => {
                assert_eq!(topics.len(), 2);
                assert_eq!(topics[0], "bookings");
            }
            _ => panic!("Expected Subscribe"),
        }
    }

    #[test]
    fn test_client_message_deserialize_ping() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type": "ping"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_server_message_serialize_booking_created() {
        let msg = ServerMessage::BookingCreated { booking: booking() };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "booking_created");
        assert_eq!(json["booking"]["itemName"], "Surgical Microscope");
        assert_eq!(json["booking"]["type"], "equipment");
    }

    #[test]
    fn test_server_message_serialize_connected() {
        let msg = ServerMessage::Connected {
            connection_id: "abc-123".to_string(),
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"connected\""));
        assert!(json.contains("\"connection_id\":\"abc-123\""));
    }

    #[test]
    fn test_event_topic_follows_kind() {
        let event = WsEvent::booking_cancelled(&booking());
        assert_eq!(event.topic, "bookings.equipment");
        assert!(matches!(event.message, ServerMessage::BookingCancelled { .. }));
    }
}
