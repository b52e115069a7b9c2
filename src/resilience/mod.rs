//! # Resilience Primitives Module
//!
//! Rate limiting for the batch dispatcher. Every batch gets a fresh
//! [`rate_limiter::RateLimiter`] whose lifetime is bound to that one run;
//! limiter state is never shared across unrelated batches.
//!
//! The limiter is the only serialization point on outbound provider calls:
//! the aggregate call rate is bounded regardless of how many workers a
//! batch runs.
//!
//! ```rust
//! use midtools::resilience::rate_limiter::{RateLimiter, RateLimiterConfig};
//! use tokio_util::sync::CancellationToken;
//! use std::time::Duration;
//!
//! # async fn demo() {
//! let config = RateLimiterConfig::new()
//!     .with_burst(2)
//!     .with_refill_interval(Duration::from_millis(300));
//! let limiter = RateLimiter::new(config);
//!
//! let cancel = CancellationToken::new();
//! if limiter.acquire(&cancel).await {
//!     // Make the provider call...
//! }
//! # }
//! ```

pub mod rate_limiter;
