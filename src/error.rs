use crate::transport::CallError;
use thiserror::Error;

/// Unified error type for the crate.
///
/// Per-item call failures never appear here: they are folded into the failed
/// item's [`Outcome`](crate::types::Outcome) by the dispatcher workers. This
/// enum covers the conditions that abort a whole operation — bad input, bad
/// configuration, or a catalog sync that cannot proceed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The provider answered at the transport level but rejected the
    /// operation as a whole (catalog syncs only; batch items are never
    /// rejected wholesale).
    #[error("Remote error: {message}")]
    Remote { message: String },

    /// A non-batch call (catalog sync) failed below the envelope level.
    #[error(transparent)]
    Call(#[from] CallError),
}

impl Error {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Error::Configuration {
            message: msg.into(),
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation {
            message: msg.into(),
        }
    }

    pub fn remote(msg: impl Into<String>) -> Self {
        Error::Remote {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_category() {
        let err = Error::validation("cars is required");
        assert_eq!(err.to_string(), "Validation error: cars is required");

        let err = Error::configuration("workers must be non-zero");
        assert!(err.to_string().starts_with("Configuration error:"));
    }
}
