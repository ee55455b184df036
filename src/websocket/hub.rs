//! Booking event fan-out
//!
//! One registry, behind one lock, maps each open socket to its outbox and
//! each topic to the sockets following it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::{ServerMessage, WsEvent, BOOKINGS_TOPIC};
use crate::booking::BookingKind;

/// Unique identifier for a WebSocket connection
pub type ConnectionId = String;

/// Limits for the hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub max_connections: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            max_connections: 1000,
        }
    }
}

struct Client {
    outbox: mpsc::UnboundedSender<ServerMessage>,
    topics: HashSet<String>,
}

#[derive(Default)]
struct Registry {
    clients: HashMap<ConnectionId, Client>,
    followers: HashMap<String, HashSet<ConnectionId>>,
}

impl Registry {
    fn follow(&mut self, id: &str, topic: &str) -> Result<(), HubError> {
        let client = self.clients.get_mut(id).ok_or(HubError::ConnectionNotFound)?;
        client.topics.insert(topic.to_string());
        self.followers
            .entry(topic.to_string())
            .or_default()
            .insert(id.to_string());
        Ok(())
    }

    fn unfollow(&mut self, id: &str, topic: &str) {
        if let Some(ids) = self.followers.get_mut(topic) {
            ids.remove(id);
            if ids.is_empty() {
                self.followers.remove(topic);
            }
        }
    }

    fn detach(&mut self, id: &str) -> bool {
        let Some(client) = self.clients.remove(id) else {
            return false;
        };
        for topic in &client.topics {
            self.unfollow(id, topic);
        }
        true
    }

    /// Push an event to everyone following its topic or an enclosing one
    fn deliver(&self, event: &WsEvent) -> usize {
        let recipients: HashSet<&ConnectionId> = topics_covering(&event.topic)
            .iter()
            .filter_map(|topic| self.followers.get(topic))
            .flatten()
            .collect();

        recipients
            .into_iter()
            .filter_map(|id| self.clients.get(id))
            .filter(|client| client.outbox.send(event.message.clone()).is_ok())
            .count()
    }
}

/// Outcome of a subscribe request
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TopicChange {
    pub accepted: Vec<String>,
    pub rejected: Vec<String>,
}

/// Tracks open booking sockets and their topics
pub struct ConnectionHub {
    registry: Arc<RwLock<Registry>>,
    config: HubConfig,
}

impl ConnectionHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            registry: Arc::new(RwLock::new(Registry::default())),
            config,
        }
    }

    /// Add a socket; fails once `max_connections` sockets are open
    pub async fn register(
        &self,
        outbox: mpsc::UnboundedSender<ServerMessage>,
    ) -> Result<ConnectionId, HubError> {
        let mut registry = self.registry.write().await;
        if registry.clients.len() >= self.config.max_connections {
            return Err(HubError::TooManyConnections(self.config.max_connections));
        }

        let id = Uuid::new_v4().to_string();
        registry.clients.insert(
            id.clone(),
            Client {
                outbox,
                topics: HashSet::new(),
            },
        );

        tracing::info!(connection_id = %id, open = registry.clients.len(), "Booking socket opened");
        Ok(id)
    }

    pub async fn unregister(&self, id: &str) {
        if self.registry.write().await.detach(id) {
            tracing::info!(connection_id = %id, "Booking socket closed");
        }
    }

    /// Follow booking topics. Unknown topics are not followed and come back in `rejected`.
    pub async fn subscribe(&self, id: &str, topics: Vec<String>) -> Result<TopicChange, HubError> {
        let mut registry = self.registry.write().await;
        if !registry.clients.contains_key(id) {
            return Err(HubError::ConnectionNotFound);
        }

        let (accepted, rejected): (Vec<String>, Vec<String>) =
            topics.into_iter().partition(|topic| is_valid_topic(topic));
        if !rejected.is_empty() {
            tracing::debug!(connection_id = %id, topics = ?rejected, "Unknown booking topics rejected");
        }

        for topic in &accepted {
            registry.follow(id, topic)?;
        }

        tracing::debug!(connection_id = %id, topics = ?accepted, "Following booking topics");
        Ok(TopicChange { accepted, rejected })
    }

    /// Stop following topics. Returns the topics that were actually followed.
    pub async fn unsubscribe(&self, id: &str, topics: Vec<String>) -> Result<Vec<String>, HubError> {
        let mut registry = self.registry.write().await;
        let client = registry
            .clients
            .get_mut(id)
            .ok_or(HubError::ConnectionNotFound)?;

        let dropped: Vec<String> = topics
            .into_iter()
            .filter(|topic| client.topics.remove(topic))
            .collect();
        for topic in &dropped {
            registry.unfollow(id, topic);
        }

        tracing::debug!(connection_id = %id, topics = ?dropped, "Stopped following booking topics");
        Ok(dropped)
    }

    /// Fire-and-forget delivery, used by the booking routes after a write
    pub fn publish(&self, event: WsEvent) {
        let registry = Arc::clone(&self.registry);
        tokio::spawn(async move {
            let delivered = registry.read().await.deliver(&event);
            tracing::trace!(topic = %event.topic, delivered, "Booking event delivered");
        });
    }

    /// Reply to one socket
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let registry = self.registry.read().await;
        let client = registry.clients.get(id).ok_or(HubError::ConnectionNotFound)?;
        client.outbox.send(message).map_err(|_| HubError::SendFailed)
    }

    pub async fn connection_count(&self) -> usize {
        self.registry.read().await.clients.len()
    }

    /// Number of sockets following exactly `topic`
    pub async fn subscription_count(&self, topic: &str) -> usize {
        self.registry
            .read()
            .await
            .followers
            .get(topic)
            .map_or(0, HashSet::len)
    }
}

/// `bookings`, `bookings.*`, or `bookings.<kind>`
fn is_valid_topic(topic: &str) -> bool {
    match topic.strip_prefix(BOOKINGS_TOPIC) {
        Some("") | Some(".*") => true,
        Some(rest) => rest
            .strip_prefix('.')
            .map_or(false, |kind| {
                [BookingKind::Facility, BookingKind::Equipment]
                    .iter()
                    .any(|k| k.as_str() == kind)
            }),
        None => false,
    }
}

/// `bookings.facility` is also seen by `bookings` and `bookings.*`
fn topics_covering(topic: &str) -> Vec<String> {
    match topic.split_once('.') {
        Some((parent, _)) => vec![
            topic.to_string(),
            parent.to_string(),
            format!("{}.*", parent),
        ],
        None => vec![topic.to_string()],
    }
}

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many open booking sockets (limit: {0})")]
    TooManyConnections(usize),

    #[error("Connection not found")]
    ConnectionNotFound,

    #[error("Connection outbox closed")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{Booking, BookingStatus};
    use chrono::{NaiveDate, Utc};

    fn booking(kind: BookingKind) -> Booking {
        Booking {
            id: 1,
            kind,
            item_id: 1,
            item_name: "Laboratory Suite B".to_string(),
            hospital_name: "Coastal Care Hospital".to_string(),
            location: "Santa Barbara, CA".to_string(),
            booking_date: NaiveDate::from_ymd_opt(2024, 10, 25).unwrap(),
            start_time: "11:00".to_string(),
            duration: 1,
            total_price: 750,
            status: BookingStatus::Confirmed,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_topics_covering() {
        assert_eq!(
            topics_covering("bookings.facility"),
            vec!["bookings.facility", "bookings", "bookings.*"]
        );
        assert_eq!(topics_covering("bookings"), vec!["bookings"]);
    }

    #[test]
    fn test_valid_topics() {
        assert!(is_valid_topic("bookings"));
        assert!(is_valid_topic("bookings.*"));
        assert!(is_valid_topic("bookings.facility"));
        assert!(is_valid_topic("bookings.equipment"));

        assert!(!is_valid_topic("bookings.rooms"));
        assert!(!is_valid_topic("bookingsx"));
        assert!(!is_valid_topic(""));
        assert!(!is_valid_topic("metrics.mood"));
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.connection_count().await, 1);

        hub.subscribe(&id, vec!["bookings.facility".to_string()])
            .await
            .unwrap();
        hub.unregister(&id).await;
        assert_eq!(hub.connection_count().await, 0);
        assert_eq!(hub.subscription_count("bookings.facility").await, 0);
    }

    #[tokio::test]
    async fn test_subscribe_reports_rejected_topics() {
        let hub = ConnectionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = hub.register(tx).await.unwrap();

        let change = hub
            .subscribe(&id, vec!["bookings".to_string(), "nonsense".to_string()])
            .await
            .unwrap();
        assert_eq!(change.accepted, vec!["bookings"]);
        assert_eq!(change.rejected, vec!["nonsense"]);
        assert_eq!(hub.subscription_count("bookings").await, 1);
        assert_eq!(hub.subscription_count("nonsense").await, 0);

        let unsubscribed = hub
            .unsubscribe(&id, vec!["bookings".to_string()])
            .await
            .unwrap();
        assert_eq!(unsubscribed, vec!["bookings"]);
        assert_eq!(hub.subscription_count("bookings").await, 0);

        hub.unregister(&id).await;
    }

    #[test]
    fn test_kind_topics_match_exactly() {
        assert!(!is_valid_topic("bookings.Facility"));
        assert!(!is_valid_topic("bookings. facility"));
        assert!(!is_valid_topic("bookings.EQUIPMENT"));
    }

    #[tokio::test]
    async fn test_connection_limit() {
        let hub = ConnectionHub::new(HubConfig { max_connections: 2 });

        let (tx1, _) = mpsc::unbounded_channel();
        let (tx2, _) = mpsc::unbounded_channel();
        let (tx3, _) = mpsc::unbounded_channel();

        hub.register(tx1).await.unwrap();
        hub.register(tx2).await.unwrap();
        let result = hub.register(tx3).await;

        assert!(matches!(result, Err(HubError::TooManyConnections(2))));
    }

    async fn next_message(rx: &mut mpsc::UnboundedReceiver<ServerMessage>) -> ServerMessage {
        tokio::time::timeout(std::time::Duration::from_secs(1), rx.recv())
            .await
            .expect("event delivered in time")
            .expect("outbox open")
    }

    #[tokio::test]
    async fn test_publish_reaches_parent_topic_followers() {
        let hub = ConnectionHub::new(HubConfig::default());

        let (tx_all, mut rx_all) = mpsc::unbounded_channel();
        let (tx_rooms, mut rx_rooms) = mpsc::unbounded_channel();
        let (tx_none, mut rx_none) = mpsc::unbounded_channel();

        let all = hub.register(tx_all).await.unwrap();
        let rooms = hub.register(tx_rooms).await.unwrap();
        hub.register(tx_none).await.unwrap();

        hub.subscribe(&all, vec!["bookings".to_string()]).await.unwrap();
        hub.subscribe(&rooms, vec!["bookings.facility".to_string()])
            .await
            .unwrap();

        hub.publish(WsEvent::booking_created(&booking(BookingKind::Equipment)));
        assert!(matches!(
            next_message(&mut rx_all).await,
            ServerMessage::BookingCreated { .. }
        ));
        // delivery to every follower happens under one lock, so the others are settled
        assert!(rx_rooms.try_recv().is_err());
        assert!(rx_none.try_recv().is_err());

        hub.publish(WsEvent::booking_cancelled(&booking(BookingKind::Facility)));
        assert!(matches!(
            next_message(&mut rx_rooms).await,
            ServerMessage::BookingCancelled { .. }
        ));
        assert!(matches!(
            next_message(&mut rx_all).await,
            ServerMessage::BookingCancelled { .. }
        ));
        assert!(rx_none.try_recv().is_err());
    }
}
