//! Unified error taxonomy for the jyotish engine platform
//!
//! Errors are typed values, never panics: each carries a machine-readable
//! kind plus a human-readable message with the offending input where one
//! exists. Stack traces are a development concern, not part of the contract.

/// Main error type for all jyotish engines.
#[derive(Debug, thiserror::Error)]
pub enum JyotishError {
    #[error("Invalid date/time: {0}")]
    InvalidDateTime(String),

    #[error("Coordinates out of range: {0}")]
    CoordinatesOutOfRange(String),

    #[error("Timezone unresolvable: {0}")]
    TimezoneUnresolvable(String),

    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(String),

    #[error("Body unsupported: {0}")]
    BodyUnsupported(String),

    #[error("Event store error: {0}")]
    EventStoreError(String),

    #[error("Sweep cancelled")]
    Cancelled,
}

impl JyotishError {
    /// Stable machine-readable kind, independent of the message text.
    pub fn kind(&self) -> &'static str {
        match self {
            JyotishError::InvalidDateTime(_) => "invalid_date_time",
            JyotishError::CoordinatesOutOfRange(_) => "coordinates_out_of_range",
            JyotishError::TimezoneUnresolvable(_) => "timezone_unresolvable",
            JyotishError::EphemerisUnavailable(_) => "ephemeris_unavailable",
            JyotishError::BodyUnsupported(_) => "body_unsupported",
            JyotishError::EventStoreError(_) => "event_store_error",
            JyotishError::Cancelled => "cancelled",
        }
    }
}
