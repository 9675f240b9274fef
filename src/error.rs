//! Error handling module for creatorbook
//!
//! Module-level errors (`BookingError`, `AuthError`, `PaymentError`, ...) stay
//! typed where they are produced. `AppError` is what the binary and the TUI
//! loop deal in.

use thiserror::Error;

use crate::availability::AvailabilityError;
use crate::booking::{BookingError, OpenBookingError};
use crate::session::AuthError;

/// Main error type for creatorbook
#[derive(Error, Debug)]
pub enum AppError {
    /// IO errors (files, terminal)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Rejected booking wizard event
    #[error(transparent)]
    Booking(#[from] BookingError),

    /// Booking could not be started
    #[error(transparent)]
    OpenBooking(#[from] OpenBookingError),

    /// Session validation failure
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid marketplace data
    #[error("Data error: {0}")]
    Data(String),

    /// General errors (catch-all)
    #[error("{0}")]
    General(String),
}

impl From<AvailabilityError> for AppError {
    fn from(err: AvailabilityError) -> Self {
        Self::Data(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::General(format!("{:#}", err))
    }
}

/// Result type alias for creatorbook operations
pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    pub fn data(msg: impl Into<String>) -> Self {
        Self::Data(msg.into())
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::config("payment_delay_ms is too large");
        assert_eq!(
            err.to_string(),
            "Configuration error: payment_delay_ms is too large"
        );

        let err: AppError = BookingError::MissingDateTime.into();
        assert_eq!(err.to_string(), "Please select both date and time");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }

    #[test]
    fn test_anyhow_keeps_context_chain() {
        let err = anyhow::anyhow!("root cause").context("Failed to load data");
        let err: AppError = err.into();
        assert_eq!(err.to_string(), "Failed to load data: root cause");
    }

    #[test]
    fn test_auth_error_conversion() {
        let err: AppError = AuthError::InvalidCredentials.into();
        assert!(matches!(err, AppError::Auth(_)));
        assert_eq!(err.to_string(), "Invalid credentials");
    }
}
