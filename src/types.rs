//! Core value types shared across the batch pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-item result of a batch operation.
///
/// Exactly one `Outcome` exists per registration that reached a worker.
/// `payload` carries the use-case-specific fields of a successful call
/// (document numbers, links, validity windows) flattened to string pairs;
/// the drivers in [`crate::drivers`] decide what goes in.
///
/// Outcomes are collected in worker-completion order, which is not the
/// input order. Callers that need input-aligned output must re-sort by
/// [`registration`](Outcome::registration).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// The registration number this outcome belongs to.
    pub registration: String,
    pub success: bool,
    /// Human-readable status or failure explanation.
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub payload: HashMap<String, String>,
}

impl Outcome {
    pub fn success(registration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            registration: registration.into(),
            success: true,
            message: message.into(),
            payload: HashMap::new(),
        }
    }

    pub fn failure(registration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            registration: registration.into(),
            success: false,
            message: message.into(),
            payload: HashMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.payload.insert(key.into(), value.into());
        self
    }

    /// Look up a payload field, empty string if absent.
    ///
    /// Drivers map absent fields to empty strings so the typed outputs
    /// mirror the provider's optional fields without `Option` noise.
    pub fn field(&self, key: &str) -> &str {
        self.payload.get(key).map(String::as_str).unwrap_or("")
    }
}
