//! HTTP transport to the MID provider API.
//!
//! One [`http::NicTransport`] per client owns the reqwest connection pool,
//! the base URL, and the API key; the drivers only supply a path and a JSON
//! body. [`CallError`] is the item-scoped failure taxonomy — its `Display`
//! strings are exactly the messages that end up on a failed item's
//! [`Outcome`](crate::types::Outcome).

mod http;

pub use http::NicTransport;

use thiserror::Error;

/// Everything that can go wrong on a single provider call, before the
/// response envelope is interpreted. None of these abort a batch; a worker
/// converts them into that item's failed outcome.
#[derive(Debug, Error)]
pub enum CallError {
    /// The outbound request body could not be serialized.
    #[error("Failed to marshal request")]
    Encoding(#[source] serde_json::Error),

    /// The outbound request could not be built (malformed endpoint).
    #[error("Failed to create request")]
    RequestConstruction(String),

    /// Network, connection, or timeout failure reaching the provider.
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The response body is not valid JSON for the expected schema.
    #[error("Invalid response from NIC")]
    Decoding(#[source] serde_json::Error),
}
