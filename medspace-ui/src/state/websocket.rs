//! WebSocket Client
//!
//! Live booking updates from the MedSpace API.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, MessageEvent, WebSocket};

use super::global::GlobalState;
use crate::api::Booking;

const MAX_RECONNECT_ATTEMPTS: u32 = 5;

/// Topic carrying every booking event
pub const BOOKINGS_TOPIC: &str = "bookings";

/// WebSocket message types from server
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WsMessage {
    Connected { connection_id: String },
    BookingCreated { booking: Booking },
    BookingCancelled { booking: Booking },
    Subscribed { topics: Vec<String> },
    Unsubscribed { topics: Vec<String> },
    Pong,
    Error { message: String },
}

/// WebSocket client message types
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Subscribe { topics: Vec<String> },
    Unsubscribe { topics: Vec<String> },
    Ping,
}

/// WebSocket client for real-time updates
#[derive(Clone)]
pub struct WebSocketClient {
    ws: Rc<RefCell<Option<WebSocket>>>,
    url: String,
    reconnect_attempts: Rc<RefCell<u32>>,
}

impl WebSocketClient {
    pub fn new(url: &str) -> Self {
        Self {
            ws: Rc::new(RefCell::new(None)),
            url: url.to_string(),
            reconnect_attempts: Rc::new(RefCell::new(0)),
        }
    }

    /// Connect to the WebSocket server
    pub fn connect(&self, state: GlobalState) {
        match WebSocket::new(&self.url) {
            Ok(ws) => {
                self.setup_handlers(&ws, state);
                *self.ws.borrow_mut() = Some(ws);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("WebSocket connection failed: {:?}", e).into());
                self.schedule_reconnect(state);
            }
        }
    }

    fn setup_handlers(&self, ws: &WebSocket, state: GlobalState) {
        // On open: reset backoff and subscribe
        let state_clone = state.clone();
        let client = self.clone();
        let on_open = Closure::wrap(Box::new(move |_: JsValue| {
            web_sys::console::log_1(&"WebSocket connected".into());
            state_clone.ws_connected.set(true);
            *client.reconnect_attempts.borrow_mut() = 0;

            if let Err(e) = client.subscribe(vec![BOOKINGS_TOPIC.to_string()]) {
                web_sys::console::error_1(&format!("Subscribe failed: {}", e).into());
            }
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        let state_clone = state.clone();
        let on_message = Closure::wrap(Box::new(move |event: MessageEvent| {
            if let Ok(text) = event.data().dyn_into::<js_sys::JsString>() {
                let text: String = text.into();
                handle_message(&text, &state_clone);
            }
        }) as Box<dyn FnMut(MessageEvent)>);
        ws.set_onmessage(Some(on_message.as_ref().unchecked_ref()));
        on_message.forget();

        let state_clone = state;
        let client = self.clone();
        let on_close = Closure::wrap(Box::new(move |event: CloseEvent| {
            web_sys::console::log_1(
                &format!("WebSocket closed: code={}, reason={}", event.code(), event.reason()).into(),
            );
            state_clone.ws_connected.set(false);
            client.schedule_reconnect(state_clone.clone());
        }) as Box<dyn FnMut(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        let on_error = Closure::wrap(Box::new(move |e: JsValue| {
            web_sys::console::error_1(&format!("WebSocket error: {:?}", e).into());
        }) as Box<dyn FnMut(JsValue)>);
        ws.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_error.forget();
    }

    /// Retry with exponential backoff, capped at 30 seconds
    fn schedule_reconnect(&self, state: GlobalState) {
        let attempts = *self.reconnect_attempts.borrow();
        let Some(delay) = reconnect_delay(attempts) else {
            web_sys::console::error_1(&"Max reconnect attempts reached".into());
            return;
        };
        *self.reconnect_attempts.borrow_mut() = attempts + 1;

        let client = self.clone();
        gloo_timers::callback::Timeout::new(delay, move || {
            web_sys::console::log_1(&format!("Attempting reconnect (attempt {})", attempts + 1).into());
            client.connect(state);
        })
        .forget();
    }

    pub fn send(&self, message: &ClientMessage) -> Result<(), String> {
        let ws_guard = self.ws.borrow();
        let ws = ws_guard.as_ref().ok_or("WebSocket not connected")?;

        let json = serde_json::to_string(message).map_err(|e| e.to_string())?;
        ws.send_with_str(&json).map_err(|e| format!("{:?}", e))
    }

    pub fn subscribe(&self, topics: Vec<String>) -> Result<(), String> {
        self.send(&ClientMessage::Subscribe { topics })
    }
}

/// Backoff delay in milliseconds, or None once attempts are exhausted
pub fn reconnect_delay(attempts: u32) -> Option<u32> {
    if attempts >= MAX_RECONNECT_ATTEMPTS {
        return None;
    }
    Some((2_u32.pow(attempts) * 1000).min(30_000))
}

/// `http://host/api/v1` becomes `ws://host/api/v1/ws`
pub fn ws_url(api_base: &str) -> String {
    let base = api_base
        .replacen("https://", "wss://", 1)
        .replacen("http://", "ws://", 1);
    format!("{}/ws", base.trim_end_matches('/'))
}

fn handle_message(text: &str, state: &GlobalState) {
    match serde_json::from_str::<WsMessage>(text) {
        Ok(WsMessage::Connected { connection_id }) => {
            web_sys::console::log_1(&format!("Connected with ID: {}", connection_id).into());
        }
        Ok(WsMessage::BookingCreated { booking }) | Ok(WsMessage::BookingCancelled { booking }) => {
            state.apply_booking(booking);
        }
        Ok(WsMessage::Subscribed { topics }) => {
            web_sys::console::log_1(&format!("Subscribed to: {:?}", topics).into());
        }
        Ok(WsMessage::Unsubscribed { .. }) | Ok(WsMessage::Pong) => {}
        Ok(WsMessage::Error { message }) => {
            web_sys::console::error_1(&format!("Server error: {}", message).into());
        }
        Err(e) => {
            web_sys::console::error_1(&format!("Failed to parse WebSocket message: {}", e).into());
        }
    }
}

/// Initialize WebSocket connection (call from app root)
pub fn init_websocket(state: GlobalState, api_base: &str) {
    let client = WebSocketClient::new(&ws_url(api_base));
    client.connect(state);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ws_url() {
        assert_eq!(ws_url("http://localhost:8082/api/v1"), "ws://localhost:8082/api/v1/ws");
        assert_eq!(ws_url("https://medspace.example/api/v1/"), "wss://medspace.example/api/v1/ws");
    }

    #[test]
    fn test_reconnect_delay() {
        assert_eq!(reconnect_delay(0), Some(1000));
        assert_eq!(reconnect_delay(3), Some(8000));
        assert_eq!(reconnect_delay(MAX_RECONNECT_ATTEMPTS), None);
    }

    #[test]
    fn test_parse_booking_event() {
        let json = r#"{"type":"booking_cancelled","booking":{
            "id": 5, "type": "facility", "itemId": 1, "itemName": "Suite",
            "hospitalName": "Memorial Hospital", "location": "San Francisco, CA",
            "bookingDate": "2024-11-01", "startTime": "09:00", "duration": 1,
            "totalPrice": 1200, "status": "cancelled", "createdAt": "2024-10-16T12:00:00Z"
        }}"#;

        match serde_json::from_str::<WsMessage>(json).unwrap() {
            WsMessage::BookingCancelled { booking } => assert!(!booking.is_confirmed()),
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_subscribe_encoding() {
        let msg = ClientMessage::Subscribe {
            topics: vec![BOOKINGS_TOPIC.to_string()],
        };
        assert_eq!(
            serde_json::to_string(&msg).unwrap(),
            r#"{"type":"subscribe","topics":["bookings"]}"#
        );
    }
}
