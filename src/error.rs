//! Error types for devmode-client.

use thiserror::Error;

/// Main error type for all devmode operations.
///
/// A decoded error frame from the device is not a `DevModeError`: the
/// exchange itself succeeded. See [`crate::codes::DeviceError`].
#[derive(Debug, Error)]
pub enum DevModeError {
    /// I/O error while talking to the companion service.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing is listening on the requested port.
    #[error("failed to connect to port {port}")]
    ConnectionRefused { port: u16 },

    /// Any other failure while establishing the connection.
    #[error("unknown error occurred while connecting: {0}")]
    Connect(#[source] std::io::Error),

    /// Response bytes did not match the fixed response layout.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Cookie does not fit the 16-bit length prefix of an auth token.
    #[error("cookie is {0} bytes, auth tokens hold at most 65535")]
    CookieTooLong(usize),

    /// Payload does not fit the 16-bit length field of a frame header.
    #[error("payload is {0} bytes, frames hold at most 65535")]
    PayloadTooLarge(usize),

    /// JSON serialization error (report output only).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias using DevModeError.
pub type Result<T> = std::result::Result<T, DevModeError>;
