//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors (reqwest, serde_json, io) into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Connection failure, timeout, or non-2xx HTTP status. Never retried.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The social API answered with an `error` payload.
    #[error("VK API error in {method} (code {code}): {message}")]
    Api {
        method: String,
        code: i64,
        message: String,
    },

    /// An expected field is missing or has the wrong type.
    #[error("Unexpected response format: {0}")]
    DataFormat(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
