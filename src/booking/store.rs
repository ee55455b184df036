//! Persistent Booking Store
//!
//! Keeps the ledger as one JSON array under `BOOKINGS_KEY` in a
//! `KeyValueStore`. Every mutation is a read-modify-write of the whole
//! array, serialized through a single async mutex.

use chrono::Utc;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::error::{BookingError, BookingResult};
use super::ledger::{BookingLedger, BookingSummary};
use super::types::{BookableItem, Booking, BookingRequest};
use crate::catalog::Catalog;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key holding the bookings array
pub const BOOKINGS_KEY: &str = "medspaceBookings";

/// Resolve the item a request refers to.
///
/// A request without a type or id resolves to `None` (the ledger reports
/// that as missing information); a request naming an item the catalog
/// doesn't have is `ItemNotFound`.
pub fn resolve_item(
    catalog: &Catalog,
    request: &BookingRequest,
) -> BookingResult<Option<BookableItem>> {
    match (request.item_type, request.item_id) {
        (Some(kind), Some(id)) => catalog
            .bookable(kind, id)
            .map(Some)
            .ok_or(BookingError::ItemNotFound { kind, id }),
        _ => Ok(None),
    }
}

/// Result of a cancel request
#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    pub booking: Booking,
    /// `false` when the booking was already cancelled and nothing was written
    pub changed: bool,
}

/// Ledger persisted through a key/value backend
pub struct BookingStore {
    kv: Arc<dyn KeyValueStore>,
    write_lock: Mutex<()>,
}

impl BookingStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            kv,
            write_lock: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &'static str {
        self.kv.backend()
    }

    /// All bookings, oldest first. A missing key is an empty list.
    pub async fn list(&self) -> BookingResult<Vec<Booking>> {
        Ok(self.load().await?.into_bookings())
    }

    pub async fn summary(&self) -> BookingResult<BookingSummary> {
        Ok(self.load().await?.summary())
    }

    /// Validate and persist a new booking
    pub async fn create(
        &self,
        request: &BookingRequest,
        item: Option<&BookableItem>,
    ) -> BookingResult<Booking> {
        let _guard = self.write_lock.lock().await;

        let mut ledger = self.load().await?;
        let booking = ledger.submit(request, item, Utc::now())?.clone();
        self.save(&ledger).await?;

        tracing::info!(
            booking_id = booking.id,
            kind = %booking.kind,
            item_id = booking.item_id,
            total_price = booking.total_price,
            "Booking created"
        );
        Ok(booking)
    }

    /// Cancel a booking. Only an actual status change is persisted.
    pub async fn cancel(&self, id: i64) -> BookingResult<Cancellation> {
        let _guard = self.write_lock.lock().await;

        let mut ledger = self.load().await?;
        let changed = ledger.cancel(id)?;
        let booking = ledger.get(id).cloned().ok_or(BookingError::NotFound(id))?;

        if changed {
            self.save(&ledger).await?;
            tracing::info!(booking_id = id, "Booking cancelled");
        }
        Ok(Cancellation { booking, changed })
    }

    async fn load(&self) -> BookingResult<BookingLedger> {
        let Some(raw) = self.kv.get(BOOKINGS_KEY).await? else {
            return Ok(BookingLedger::new());
        };

        let bookings: Vec<Booking> =
            serde_json::from_str(&raw).map_err(|e| StorageError::Corruption {
                key: BOOKINGS_KEY.to_string(),
                reason: e.to_string(),
            })?;

        Ok(BookingLedger::from_bookings(bookings))
    }

    async fn save(&self, ledger: &BookingLedger) -> BookingResult<()> {
        let json = serde_json::to_string_pretty(ledger.bookings()).map_err(StorageError::from)?;
        self.kv.set(BOOKINGS_KEY, &json).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::booking::{BookingKind, BookingStatus};
    use crate::storage::{FileStore, MemoryStore};
    use tempfile::tempdir;

    fn request(kind: BookingKind, id: u32) -> BookingRequest {
        BookingRequest::new(kind, id)
            .date("2024-10-21")
            .time("14:30")
            .duration(2)
    }

    fn memory_store() -> (Arc<MemoryStore>, BookingStore) {
        let kv = Arc::new(MemoryStore::new());
        (kv.clone(), BookingStore::new(kv))
    }

    #[tokio::test]
    async fn test_empty_list() {
        let (_, store) = memory_store();
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_persists() {
        let catalog = Catalog::seeded();
        let (kv, store) = memory_store();

        let req = request(BookingKind::Facility, 3);
        let item = resolve_item(&catalog, &req).unwrap();
        let booking = store.create(&req, item.as_ref()).await.unwrap();
        assert_eq!(booking.total_price, 950 * 2);

        let raw = kv.get(BOOKINGS_KEY).await.unwrap().unwrap();
        let persisted: Vec<Booking> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![booking]);
    }

    #[tokio::test]
    async fn test_missing_information_persists_nothing() {
        let (kv, store) = memory_store();
        let req = BookingRequest {
            item_type: None,
            item_id: None,
            ..request(BookingKind::Facility, 1)
        };

        let result = store.create(&req, None).await;
        assert!(matches!(result, Err(BookingError::MissingInformation(_))));
        assert!(kv.get(BOOKINGS_KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_resolve_item() {
        let catalog = Catalog::seeded();

        let found = resolve_item(&catalog, &request(BookingKind::Equipment, 4)).unwrap();
        assert_eq!(found.unwrap().name(), "Dermatology Laser System");

        let missing = resolve_item(&catalog, &request(BookingKind::Equipment, 40));
        assert!(matches!(
            missing,
            Err(BookingError::ItemNotFound { id: 40, .. })
        ));

        let unspecified = BookingRequest {
            item_id: None,
            ..request(BookingKind::Facility, 1)
        };
        assert!(resolve_item(&catalog, &unspecified).unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancel_persists() {
        let catalog = Catalog::seeded();
        let (_, store) = memory_store();

        let req = request(BookingKind::Facility, 1);
        let item = resolve_item(&catalog, &req).unwrap();
        let created = store.create(&req, item.as_ref()).await.unwrap();

        let cancelled = store.cancel(created.id).await.unwrap();
        assert!(cancelled.changed);
        assert_eq!(cancelled.booking.status, BookingStatus::Cancelled);

        let listed = store.list().await.unwrap();
        assert_eq!(listed[0].status, BookingStatus::Cancelled);
        assert_eq!(listed[0].total_price, created.total_price);

        assert!(matches!(
            store.cancel(1).await,
            Err(BookingError::NotFound(1))
        ));
    }

    #[tokio::test]
    async fn test_second_cancel_writes_nothing() {
        let catalog = Catalog::seeded();
        let (kv, store) = memory_store();

        let req = request(BookingKind::Equipment, 2);
        let item = resolve_item(&catalog, &req).unwrap();
        let created = store.create(&req, item.as_ref()).await.unwrap();
        store.cancel(created.id).await.unwrap();

        // Re-encode the stored array so any rewrite would be visible
        let persisted: Vec<Booking> =
            serde_json::from_str(&kv.get(BOOKINGS_KEY).await.unwrap().unwrap()).unwrap();
        let pretty = serde_json::to_string_pretty(&persisted).unwrap();
        kv.set(BOOKINGS_KEY, &pretty).await.unwrap();

        let again = store.cancel(created.id).await.unwrap();
        assert!(!again.changed);
        assert_eq!(again.booking.status, BookingStatus::Cancelled);
        assert_eq!(kv.get(BOOKINGS_KEY).await.unwrap().unwrap(), pretty);
    }

    #[tokio::test]
    async fn test_corrupt_json_is_reported() {
        let (kv, store) = memory_store();
        kv.set(BOOKINGS_KEY, "{not json").await.unwrap();

        let err = store.list().await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::Storage(StorageError::Corruption { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_creates_all_persist() {
        let catalog = Catalog::seeded();
        let (_, store) = memory_store();
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for i in 0..20u32 {
            let store = store.clone();
            let req = request(BookingKind::Equipment, i % 5 + 1);
            let item = resolve_item(&catalog, &req).unwrap();
            handles.push(tokio::spawn(async move {
                store.create(&req, item.as_ref()).await.unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let bookings = store.list().await.unwrap();
        assert_eq!(bookings.len(), 20);

        let mut ids: Vec<i64> = bookings.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 20);
    }

    #[tokio::test]
    async fn test_file_backed_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let catalog = Catalog::seeded();
        let req = request(BookingKind::Facility, 4);
        let item = resolve_item(&catalog, &req).unwrap();

        let created = {
            let kv = Arc::new(FileStore::open(dir.path()).await.unwrap());
            let store = BookingStore::new(kv);
            store.create(&req, item.as_ref()).await.unwrap()
        };

        let kv = Arc::new(FileStore::open(dir.path()).await.unwrap());
        let reopened = BookingStore::new(kv);
        assert_eq!(reopened.list().await.unwrap(), vec![created]);
        assert_eq!(reopened.backend(), "file");
    }
}
