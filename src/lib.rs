//! # midtools
//!
//! Batch client for Ghana's Motor Insurance Database (MID) provider API.
//!
//! The provider exposes per-vehicle operations — brown-card issuance,
//! insurance-sticker issuance, policy verification, and a USSD
//! insurance-status check — while consumers submit whole lists of
//! registration numbers at once. This crate bridges the two with a
//! rate-limited concurrent batch dispatcher: one remote call per
//! registration, a fixed worker pool, a token-bucket cap on the aggregate
//! call rate, and one outcome per item no matter how any single call ends.
//!
//! ## Core Philosophy
//!
//! - **One dispatcher, four endpoints**: the endpoints differ only in
//!   payload framing and response mapping, so each is a request-builder /
//!   response-mapper pair over one shared call flow.
//! - **Failures are outcomes**: a single registration's failure — network,
//!   malformed response, business rejection — shapes that item's outcome
//!   and nothing else. No retries, no batch aborts.
//! - **Limiter per batch**: rate-limit state lives and dies with one run;
//!   nothing is shared across unrelated batches.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use midtools::MidClient;
//!
//! #[tokio::main]
//! async fn main() -> midtools::Result<()> {
//!     let client = MidClient::builder()
//!         .api_endpoint("https://nic.example.com")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let results = client.brown_cards("GR123422, AS1234GH\nDV123422").await?;
//!     for result in results {
//!         println!("{}: {}", result.car_number, result.message);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`batch`] | Batch dispatcher, worker pool, outcome collector |
//! | [`resilience`] | Token-bucket rate limiter |
//! | [`transport`] | HTTP transport and per-call error taxonomy |
//! | [`drivers`] | The four provider endpoint variants |
//! | [`plate`] | Ghana license-plate classifier |
//! | [`catalog`] | Product and risk-type lookup tables |
//! | [`client`] | `MidClient` facade and builder |
//! | [`config`] | Env-overridable configuration |

pub mod batch;
pub mod catalog;
pub mod client;
pub mod config;
pub mod drivers;
pub mod plate;
pub mod resilience;
pub mod transport;
pub mod types;

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub mod error;
pub use error::Error;

// Re-export main types for convenience
pub use batch::{BatchDispatcher, DispatchConfig, RemoteCall};
pub use client::{MidClient, MidClientBuilder};
pub use config::Config;
pub use types::Outcome;
