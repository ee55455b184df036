//! Booking error types
//!
//! Defines every condition under which a booking submission or cancellation
//! is refused.

use thiserror::Error;

use super::types::BookingKind;

/// Errors that can occur during booking operations
#[derive(Error, Debug)]
pub enum BookingError {
    /// No item selected, or date/time left empty
    #[error("Missing information: {0}")]
    MissingInformation(String),

    /// Duration outside the item's bookable range
    #[error("Invalid duration {duration}: {kind} bookings must be between 1 and {max} {unit}")]
    InvalidDuration {
        kind: BookingKind,
        duration: u32,
        max: u32,
        unit: &'static str,
    },

    /// Booking date is not YYYY-MM-DD
    #[error("Invalid booking date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Start time is not HH:MM
    #[error("Invalid start time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// No booking with the given id
    #[error("Booking not found: {0}")]
    NotFound(i64),

    /// Referenced catalog item does not exist
    #[error("{kind} not found: {id}")]
    ItemNotFound { kind: BookingKind, id: u32 },

    /// Persistence layer error
    #[error("Storage error: {0}")]
    Storage(#[from] crate::storage::StorageError),
}

/// Result type for booking operations
pub type BookingResult<T> = Result<T, BookingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BookingError::InvalidDuration {
            kind: BookingKind::Facility,
            duration: 13,
            max: 12,
            unit: "hours",
        };
        assert_eq!(
            err.to_string(),
            "Invalid duration 13: facility bookings must be between 1 and 12 hours"
        );

        let err = BookingError::ItemNotFound {
            kind: BookingKind::Equipment,
            id: 9,
        };
        assert_eq!(err.to_string(), "equipment not found: 9");
    }
}
