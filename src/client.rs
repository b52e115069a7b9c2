//! Client facade and builder.

use crate::batch::{BatchDispatcher, DispatchConfig};
use crate::catalog::{self, CatalogStore, MemoryCatalog, Product, RiskType};
use crate::config::Config;
use crate::drivers::brown_card::{self, BrownCardOutput};
use crate::drivers::policy_verification::{self, PolicyVerificationOutput};
use crate::drivers::sticker::{self, StickerOutput};
use crate::drivers::ussd_check::{self, UssdCheckOutput};
use crate::drivers::NicEndpoint;
use crate::plate;
use crate::resilience::rate_limiter::RateLimiterConfig;
use crate::transport::NicTransport;
use crate::types::Outcome;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Builder for [`MidClient`].
///
/// Keep this surface small: endpoint and key are the only required inputs,
/// everything else has the deployment defaults from [`Config`].
pub struct MidClientBuilder {
    config: Config,
    store: Option<Arc<dyn CatalogStore>>,
}

impl MidClientBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::new("", ""),
            store: None,
        }
    }

    /// Base URL of the provider API.
    pub fn api_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.api_endpoint = endpoint.into();
        self
    }

    /// API key placed in the `Authorization: x-api-key <key>` header.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.config.http_timeout = timeout;
        self
    }

    /// Fixed worker count per batch.
    pub fn workers(mut self, workers: usize) -> Self {
        self.config.workers = workers;
        self
    }

    /// Token-bucket settings applied to every batch.
    pub fn rate_limit(mut self, refill_interval: Duration, burst: u32) -> Self {
        self.config.refill_interval = refill_interval;
        self.config.burst = burst;
        self
    }

    /// Swap the in-memory catalog for a durable backend.
    pub fn catalog_store(mut self, store: Arc<dyn CatalogStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn build(self) -> Result<MidClient> {
        self.config.validate()?;
        let transport = Arc::new(NicTransport::new(&self.config)?);
        let dispatch = DispatchConfig::new()
            .with_workers(self.config.workers)
            .with_rate_limit(
                RateLimiterConfig::new()
                    .with_refill_interval(self.config.refill_interval)
                    .with_burst(self.config.burst),
            );
        Ok(MidClient {
            transport,
            dispatcher: BatchDispatcher::with_config(dispatch),
            store: self
                .store
                .unwrap_or_else(|| Arc::new(MemoryCatalog::new())),
        })
    }
}

impl Default for MidClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Entry point for the MID batch tools.
///
/// Each batch operation takes one delimited string of registration numbers
/// (comma, newline, or tab separated), screens them through the plate
/// classifier, dispatches the survivors, and returns one typed output per
/// registration — screened-out plates included. Output order is not the
/// input order.
///
/// For cancellation control, build an endpoint from [`crate::drivers`] and
/// drive [`MidClient::dispatcher`] directly with your own token.
pub struct MidClient {
    transport: Arc<NicTransport>,
    dispatcher: BatchDispatcher,
    store: Arc<dyn CatalogStore>,
}

impl std::fmt::Debug for MidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MidClient").finish_non_exhaustive()
    }
}

impl MidClient {
    pub fn builder() -> MidClientBuilder {
        MidClientBuilder::new()
    }

    /// Build a client from `MIDTOOLS_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let config = Config::from_env()?;
        MidClientBuilder {
            config,
            store: None,
        }
        .build()
    }

    pub fn dispatcher(&self) -> &BatchDispatcher {
        &self.dispatcher
    }

    pub fn transport(&self) -> Arc<NicTransport> {
        Arc::clone(&self.transport)
    }

    /// Issue brown cards for a delimited list of registrations.
    pub async fn brown_cards(&self, cars: &str) -> Result<Vec<BrownCardOutput>> {
        let outcomes = self
            .run_screened(cars, brown_card::endpoint(self.transport()))
            .await?;
        Ok(outcomes.into_iter().map(BrownCardOutput::from).collect())
    }

    /// Issue insurance stickers for a delimited list of registrations.
    pub async fn stickers(&self, cars: &str) -> Result<Vec<StickerOutput>> {
        let outcomes = self
            .run_screened(cars, sticker::endpoint(self.transport()))
            .await?;
        Ok(outcomes.into_iter().map(StickerOutput::from).collect())
    }

    /// Verify active policies for a delimited list of registrations.
    pub async fn policy_verifications(&self, cars: &str) -> Result<Vec<PolicyVerificationOutput>> {
        let outcomes = self
            .run_screened(cars, policy_verification::endpoint(self.transport()))
            .await?;
        Ok(outcomes
            .into_iter()
            .map(PolicyVerificationOutput::from)
            .collect())
    }

    /// Run the USSD insurance-status check for a delimited list of
    /// registrations.
    pub async fn ussd_checks(&self, cars: &str) -> Result<Vec<UssdCheckOutput>> {
        let outcomes = self
            .run_screened(cars, ussd_check::endpoint(self.transport()))
            .await?;
        Ok(outcomes.into_iter().map(UssdCheckOutput::from).collect())
    }

    /// Refresh the product catalog from the provider.
    pub async fn sync_products(&self) -> Result<()> {
        catalog::sync_products(&self.transport, self.store.as_ref()).await
    }

    pub async fn products(&self) -> Result<Vec<Product>> {
        self.store.products().await
    }

    /// Refresh the risk-type catalog from the provider.
    pub async fn sync_risk_types(&self) -> Result<()> {
        catalog::sync_risk_types(&self.transport, self.store.as_ref()).await
    }

    pub async fn risk_types(&self) -> Result<Vec<RiskType>> {
        self.store.risk_types().await
    }

    async fn run_screened(&self, cars: &str, endpoint: NicEndpoint) -> Result<Vec<Outcome>> {
        let (valid, mut outcomes) = screen(cars)?;
        let dispatched = self
            .dispatcher
            .run(valid, Arc::new(endpoint), CancellationToken::new())
            .await?;
        outcomes.extend(dispatched);
        Ok(outcomes)
    }
}

/// Split the delimited input and screen each registration through the plate
/// classifier.
///
/// Returns the registrations worth dispatching plus a synthetic failed
/// outcome for every plate the classifier rejected; rejected plates never
/// produce a provider call.
fn screen(cars: &str) -> Result<(Vec<String>, Vec<Outcome>)> {
    if cars.trim().is_empty() {
        return Err(Error::validation("cars is required"));
    }

    let parts: Vec<&str> = cars
        .split(|c| matches!(c, ',' | '\n' | '\r' | '\t'))
        .filter(|part| !part.is_empty())
        .collect();
    if parts.is_empty() {
        return Err(Error::validation("cars is required"));
    }

    let mut valid = Vec::with_capacity(parts.len());
    let mut rejected = Vec::new();
    for part in parts {
        let check = plate::classify(part);
        if check.valid {
            valid.push(part.to_string());
        } else {
            rejected.push(Outcome::failure(part, check.detail));
        }
    }
    Ok((valid, rejected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_splits_on_all_delimiters() {
        let (valid, rejected) = screen("GR123422,AS1234GH\nM12345\tDV123422").unwrap();
        assert_eq!(valid.len(), 4);
        assert!(rejected.is_empty());
    }

    #[test]
    fn test_screen_rejects_bad_plates_without_dispatch() {
        let (valid, rejected) = screen("GR123422,ZZ123422").unwrap();
        assert_eq!(valid, vec!["GR123422".to_string()]);
        assert_eq!(rejected.len(), 1);
        assert!(!rejected[0].success);
        assert_eq!(rejected[0].registration, "ZZ123422");
        assert_eq!(rejected[0].message, "Invalid region code: ZZ");
    }

    #[test]
    fn test_screen_blank_input_is_validation_error() {
        assert!(matches!(screen("   "), Err(Error::Validation { .. })));
        assert!(matches!(screen(",,\n"), Err(Error::Validation { .. })));
    }

    #[test]
    fn test_builder_requires_endpoint() {
        let err = MidClientBuilder::new().api_key("k").build().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_builder_defaults() {
        let client = MidClientBuilder::new()
            .api_endpoint("https://nic.example.com")
            .api_key("k")
            .build()
            .unwrap();
        assert_eq!(client.dispatcher().config().workers, 5);
        assert_eq!(client.dispatcher().config().limiter.burst, 2);
    }
}
