//! Booking socket lifecycle
//!
//! Upgrade, register with the hub, then run two loops until either side
//! hangs up: hub outbox → socket, and socket → subscription changes.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::hub::{ConnectionHub, ConnectionId, TopicChange};
use super::messages::{ClientMessage, ServerMessage};
use crate::api::AppState;

/// GET /api/v1/ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    let hub = Arc::clone(&state.ws_hub);
    ws.on_upgrade(move |socket| run_socket(socket, hub))
}

/// Whether the read loop keeps going after a frame
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Close,
}

struct Session {
    hub: Arc<ConnectionHub>,
    id: ConnectionId,
}

impl Session {
    /// Answer one inbound frame. Replies travel through the hub outbox.
    async fn on_frame(&self, frame: Message) -> Flow {
        let replies = match frame {
            Message::Text(text) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(message) => self.apply(message).await,
                Err(e) => {
                    tracing::debug!(connection_id = %self.id, error = %e, "Unreadable client message");
                    vec![ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    }]
                }
            },
            Message::Binary(_) => vec![ServerMessage::Error {
                message: "Binary messages not supported".to_string(),
            }],
            Message::Ping(_) | Message::Pong(_) => return Flow::Continue,
            Message::Close(_) => return Flow::Close,
        };

        for reply in replies {
            let _ = self.hub.send_to(&self.id, reply).await;
        }
        Flow::Continue
    }

    /// Replies for one client message, in send order
    async fn apply(&self, message: ClientMessage) -> Vec<ServerMessage> {
        let outcome = match message {
            ClientMessage::Ping => return vec![ServerMessage::Pong],
            ClientMessage::Subscribe { topics } => self
                .hub
                .subscribe(&self.id, topics)
                .await
                .map(subscribe_replies),
            ClientMessage::Unsubscribe { topics } => self
                .hub
                .unsubscribe(&self.id, topics)
                .await
                .map(|topics| vec![ServerMessage::Unsubscribed { topics }]),
        };

        outcome.unwrap_or_else(|e| {
            tracing::warn!(connection_id = %self.id, error = %e, "Subscription change rejected");
            vec![ServerMessage::Error {
                message: e.to_string(),
            }]
        })
    }
}

/// `subscribed` for what was followed, then `error` naming any unknown topics.
/// A request with nothing valid gets only the error.
fn subscribe_replies(change: TopicChange) -> Vec<ServerMessage> {
    let mut replies = Vec::with_capacity(2);
    if !change.accepted.is_empty() || change.rejected.is_empty() {
        replies.push(ServerMessage::Subscribed {
            topics: change.accepted,
        });
    }
    if !change.rejected.is_empty() {
        replies.push(ServerMessage::Error {
            message: format!("Unknown topic(s): {}", change.rejected.join(", ")),
        });
    }
    replies
}

fn to_frame(message: &ServerMessage) -> Option<Message> {
    serde_json::to_string(message)
        .map(Message::Text)
        .map_err(|e| tracing::error!(error = %e, "Could not encode server message"))
        .ok()
}

async fn push(sink: &mut SplitSink<WebSocket, Message>, message: &ServerMessage) -> bool {
    match to_frame(message) {
        Some(frame) => sink.send(frame).await.is_ok(),
        None => false,
    }
}

async fn run_socket(socket: WebSocket, hub: Arc<ConnectionHub>) {
    let (mut sink, mut stream) = socket.split();
    let (outbox, mut inbox) = mpsc::unbounded_channel::<ServerMessage>();

    let id = match hub.register(outbox).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(error = %e, "Refusing booking socket");
            push(&mut sink, &ServerMessage::Error { message: e.to_string() }).await;
            return;
        }
    };

    if !push(&mut sink, &ServerMessage::Connected { connection_id: id.clone() }).await {
        hub.unregister(&id).await;
        return;
    }

    let writer_id = id.clone();
    let mut writer = tokio::spawn(async move {
        while let Some(message) = inbox.recv().await {
            let Some(frame) = to_frame(&message) else {
                continue;
            };
            if sink.send(frame).await.is_err() {
                tracing::debug!(connection_id = %writer_id, "Socket write failed");
                break;
            }
        }
    });

    let session = Session {
        hub: Arc::clone(&hub),
        id: id.clone(),
    };
    let mut reader = tokio::spawn(async move {
        while let Some(frame) = stream.next().await {
            let frame = match frame {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::debug!(connection_id = %session.id, error = %e, "Socket read failed");
                    break;
                }
            };
            if session.on_frame(frame).await == Flow::Close {
                break;
            }
        }
    });

    tokio::select! {
        _ = &mut writer => reader.abort(),
        _ = &mut reader => writer.abort(),
    }

    hub.unregister(&id).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::websocket::HubConfig;

    async fn session() -> (Session, mpsc::UnboundedReceiver<ServerMessage>) {
        let hub = Arc::new(ConnectionHub::new(HubConfig::default()));
        let (tx, rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();
        (Session { hub, id }, rx)
    }

    fn subscribe(topics: &[&str]) -> ClientMessage {
        ClientMessage::Subscribe {
            topics: topics.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_subscribe_and_ping_replies() {
        let (session, _rx) = session().await;

        let replies = session.apply(subscribe(&["bookings"])).await;
        assert_eq!(replies.len(), 1);
        assert!(matches!(&replies[0], ServerMessage::Subscribed { topics } if topics[0] == "bookings"));

        let replies = session.apply(ClientMessage::Ping).await;
        assert!(matches!(replies.as_slice(), [ServerMessage::Pong]));
    }

    #[tokio::test]
    async fn test_unknown_topic_gets_error() {
        let (session, _rx) = session().await;

        let replies = session.apply(subscribe(&["metrics.mood"])).await;
        match replies.as_slice() {
            [ServerMessage::Error { message }] => assert!(message.contains("metrics.mood")),
            other => panic!("unexpected replies: {:?}", other),
        }
        assert_eq!(session.hub.subscription_count("metrics.mood").await, 0);
    }

    #[tokio::test]
    async fn test_mixed_topics_get_subscribed_then_error() {
        let (session, mut rx) = session().await;

        let frame = Message::Text(
            r#"{"type":"subscribe","topics":["bookings.facility","bookings.rooms"]}"#.to_string(),
        );
        assert_eq!(session.on_frame(frame).await, Flow::Continue);

        assert!(matches!(
            rx.try_recv(),
            Ok(ServerMessage::Subscribed { ref topics }) if topics == &vec!["bookings.facility".to_string()]
        ));
        assert!(matches!(
            rx.try_recv(),
            Ok(ServerMessage::Error { ref message }) if message.contains("bookings.rooms")
        ));
    }

    #[tokio::test]
    async fn test_unknown_connection_gets_error() {
        let (session, _rx) = session().await;
        let stranger = Session {
            hub: Arc::clone(&session.hub),
            id: "no-such-connection".to_string(),
        };

        let replies = stranger
            .apply(ClientMessage::Unsubscribe { topics: vec![] })
            .await;
        assert!(matches!(replies.as_slice(), [ServerMessage::Error { .. }]));
    }

    #[tokio::test]
    async fn test_bad_frames_keep_socket_open() {
        let (session, mut rx) = session().await;

        assert_eq!(session.on_frame(Message::Text("{oops".to_string())).await, Flow::Continue);
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Error { .. })));

        assert_eq!(session.on_frame(Message::Binary(vec![1, 2])).await, Flow::Continue);
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Error { .. })));

        assert_eq!(session.on_frame(Message::Close(None)).await, Flow::Close);
    }

    #[tokio::test]
    async fn test_ping_frame_is_silent() {
        let (session, mut rx) = session().await;
        assert_eq!(session.on_frame(Message::Ping(vec![])).await, Flow::Continue);
        assert!(rx.try_recv().is_err());
    }
}
