//! Booking Ledger
//!
//! The in-memory list of bookings together with the rules for adding to it
//! and cancelling from it. Persistence lives in `store`; everything here is
//! synchronous and deterministic given `now`.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{BookingError, BookingResult};
use super::types::{BookableItem, Booking, BookingRequest, BookingStatus};

/// Counts and revenue over the ledger
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingSummary {
    pub total: usize,
    pub confirmed: usize,
    pub cancelled: usize,
    /// Sum of `totalPrice` over confirmed bookings
    pub confirmed_revenue: u64,
}

/// Ordered list of bookings, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bookings(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn into_bookings(self) -> Vec<Booking> {
        self.bookings
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.id == id)
    }

    /// Validate a request against its resolved item and append one confirmed booking.
    ///
    /// Nothing is appended on error.
    pub fn submit(
        &mut self,
        request: &BookingRequest,
        item: Option<&BookableItem>,
        now: DateTime<Utc>,
    ) -> BookingResult<&Booking> {
        let item = item.ok_or_else(|| {
            BookingError::MissingInformation("no facility or equipment selected".to_string())
        })?;

        let date_input = request.booking_date.trim();
        let time_input = request.start_time.trim();
        if date_input.is_empty() || time_input.is_empty() {
            return Err(BookingError::MissingInformation(
                "booking date and start time are required".to_string(),
            ));
        }

        let max = item.max_duration();
        if request.duration == 0 || request.duration > max {
            return Err(BookingError::InvalidDuration {
                kind: item.kind(),
                duration: request.duration,
                max,
                unit: item.unit(),
            });
        }

        let booking_date = NaiveDate::parse_from_str(date_input, "%Y-%m-%d")
            .map_err(|_| BookingError::InvalidDate(date_input.to_string()))?;
        let start_time = NaiveTime::parse_from_str(time_input, "%H:%M")
            .map_err(|_| BookingError::InvalidTime(time_input.to_string()))?;

        let booking = Booking {
            id: self.next_id(now),
            kind: item.kind(),
            item_id: item.id(),
            item_name: item.name().to_string(),
            hospital_name: item.hospital().to_string(),
            location: item.location().to_string(),
            booking_date,
            start_time: start_time.format("%H:%M").to_string(),
            duration: request.duration,
            total_price: item.total_for(request.duration),
            status: BookingStatus::Confirmed,
            created_at: now,
        };

        tracing::debug!(
            booking_id = booking.id,
            kind = %booking.kind,
            item_id = booking.item_id,
            total_price = booking.total_price,
            "Booking appended"
        );

        self.bookings.push(booking);
        Ok(&self.bookings[self.bookings.len() - 1])
    }

    /// Flip a booking's status to cancelled. Returns `false` when it already was.
    pub fn cancel(&mut self, id: i64) -> BookingResult<bool> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(BookingError::NotFound(id))?;

        if booking.status == BookingStatus::Cancelled {
            tracing::debug!(booking_id = id, "Booking already cancelled");
            return Ok(false);
        }
        booking.status = BookingStatus::Cancelled;
        Ok(true)
    }

    pub fn summary(&self) -> BookingSummary {
        self.bookings
            .iter()
            .fold(BookingSummary::default(), |mut acc, b| {
                acc.total += 1;
                match b.status {
                    BookingStatus::Confirmed => {
                        acc.confirmed += 1;
                        acc.confirmed_revenue += b.total_price;
                    }
                    BookingStatus::Cancelled => acc.cancelled += 1,
                }
                acc
            })
    }

    /// Milliseconds at `now`, or one past the current maximum on collision
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        if self.bookings.iter().any(|b| b.id == candidate) {
            self.bookings.iter().map(|b| b.id).max().unwrap_or(candidate) + 1
        } else {
            candidate
        }
    }
}
