//! # Batch Dispatch Module
//!
//! The rate-limited concurrent batch dispatcher: N independent registration
//! numbers in, one [`Outcome`](crate::types::Outcome) per processed item
//! out, under a fixed worker count and a global token-bucket rate limit.
//!
//! ## Key Components
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`BatchDispatcher`] | Orchestrates one batch: job channel, worker pool, limiter, collector |
//! | [`DispatchConfig`] | Worker count and rate-limit settings |
//! | [`OutcomeCollector`] | Concurrency-safe accumulator, one outcome per dispatched item |
//! | [`RemoteCall`] | Capability turning one item into one provider call |
//!
//! ## Contract
//!
//! - One item's failure never aborts the batch or touches other items; it
//!   only shapes that item's own outcome.
//! - No retries: a failing item produces exactly one call attempt.
//! - Outcome order is completion order, not input order.
//! - A fresh rate limiter is created per run; limiter state never crosses
//!   batches.
//! - The only dispatch-level error is misconfiguration; partial failure is
//!   never one.
//!
//! ## Example
//!
//! ```rust,no_run
//! use midtools::batch::{BatchDispatcher, RemoteCall};
//! use midtools::types::Outcome;
//! use async_trait::async_trait;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl RemoteCall for Echo {
//!     async fn call(&self, registration: &str) -> Outcome {
//!         Outcome::success(registration, "ok")
//!     }
//! }
//!
//! # async fn demo() -> midtools::Result<()> {
//! let dispatcher = BatchDispatcher::new();
//! let outcomes = dispatcher
//!     .run(
//!         vec!["GR123422".into(), "AS1234GH".into()],
//!         Arc::new(Echo),
//!         CancellationToken::new(),
//!     )
//!     .await?;
//! assert_eq!(outcomes.len(), 2);
//! # Ok(())
//! # }
//! ```

mod collector;
mod dispatcher;

pub use collector::OutcomeCollector;
pub use dispatcher::{BatchDispatcher, DispatchConfig};

use crate::types::Outcome;
use async_trait::async_trait;

/// Capability that turns one work item into one outbound provider call.
///
/// Implementations own all HTTP-level concerns (timeout, headers, body
/// encoding/decoding) and must fold every failure — transport, malformed
/// response, business rejection — into the returned outcome. `call` is
/// infallible by design: the dispatcher never interprets errors, only
/// outcomes.
#[async_trait]
pub trait RemoteCall: Send + Sync {
    async fn call(&self, registration: &str) -> Outcome;
}
