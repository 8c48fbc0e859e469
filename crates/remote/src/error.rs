//! Remote Source Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.

use derive_more::{Display, Error};

/// A remote source error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for remote source operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// The display text of each variant is shown to users as-is (for example in
/// the error list of an ingestion summary), so keep it short and plain.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The source answered with a non-success status.
    #[display("HTTP {_0}")]
    Status(#[error(not(source))] u16),
    /// No complete response arrived within the configured timeout.
    #[display("request timed out")]
    Timeout,
    /// Connecting to or talking to the source failed.
    #[display("connection error: {_0}")]
    Network(#[error(not(source))] String),
    /// The response body did not have the expected shape.
    #[display("unexpected response: {_0}")]
    Decode(#[error(not(source))] String),
    /// The source could not be constructed from its configuration.
    #[display("invalid source configuration: {_0}")]
    Config(#[error(not(source))] String),
}

impl From<&reqwest::Error> for ErrorKind {
    fn from(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status(status.as_u16())
        } else if err.is_builder() {
            Self::Config(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorKind::Status(404), "HTTP 404")]
    #[case(ErrorKind::Timeout, "request timed out")]
    #[case(ErrorKind::Network("connection refused".to_string()), "connection error: connection refused")]
    #[case(ErrorKind::Decode("missing field `id`".to_string()), "unexpected response: missing field `id`")]
    fn test_display(#[case] kind: ErrorKind, #[case] expected: &str) {
        assert_eq!(kind.to_string(), expected);
    }
}
