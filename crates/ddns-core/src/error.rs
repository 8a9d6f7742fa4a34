//! Error types for the DDNS client
//!
//! This module defines all error types used throughout the crate.

use hickory_proto::op::ResponseCode;
use thiserror::Error;

/// Result type alias for DDNS operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the DDNS client
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing or malformed environment)
    #[error("{0}")]
    Config(String),

    /// TSIG key errors (bad encoding, unsupported algorithm)
    #[error("TSIG key error: {0}")]
    Keyring(String),

    /// The `--ipaddr` value is not an IPv4 or IPv6 literal
    #[error("Invalid IP address.")]
    InvalidIpAddress(String),

    /// Invalid input (host names outside the zone, malformed names)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transport errors (connect, timeout, signature verification)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with a non-NOERROR response code
    #[error("Server returned {code} for {operation}")]
    Protocol {
        /// Operation that was rejected ("UPDATE" or "AXFR")
        operation: &'static str,
        /// Response code from the server
        code: ResponseCode,
    },

    /// Name resolution and socket errors
    #[error("Network error: {0}")]
    Network(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a keyring error
    pub fn keyring(msg: impl Into<String>) -> Self {
        Self::Keyring(msg.into())
    }

    /// Create an invalid IP address error, keeping the rejected value
    pub fn invalid_ip(value: impl Into<String>) -> Self {
        Self::InvalidIpAddress(value.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a protocol error from a server response code
    pub fn protocol(operation: &'static str, code: ResponseCode) -> Self {
        Self::Protocol { operation, code }
    }

    /// Whether this error was caused by the invocation itself (configuration
    /// or arguments) rather than by the exchange with the server
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::Config(_) | Self::Keyring(_) | Self::InvalidIpAddress(_) | Self::InvalidInput(_)
        )
    }
}

impl From<hickory_proto::ProtoError> for Error {
    fn from(err: hickory_proto::ProtoError) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
