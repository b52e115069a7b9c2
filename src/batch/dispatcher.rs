//! Batch dispatcher: job channel, worker pool, per-batch rate limiter.

use super::{OutcomeCollector, RemoteCall};
use crate::resilience::rate_limiter::{RateLimiter, RateLimiterConfig};
use crate::types::Outcome;
use crate::{Error, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Fixed number of concurrent workers per batch.
    pub workers: usize,
    /// Limiter settings; a fresh limiter is built from these for every run.
    pub limiter: RateLimiterConfig,
}

impl DispatchConfig {
    pub fn new() -> Self {
        Self {
            workers: 5,
            limiter: RateLimiterConfig::new(),
        }
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_rate_limit(mut self, limiter: RateLimiterConfig) -> Self {
        self.limiter = limiter;
        self
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Orchestrates one batch: starts the worker pool, feeds items, waits for
/// drain, returns the collected outcomes.
///
/// The job channel is sized to the batch and the feeder selects on the
/// cancellation token, so the feeding stage can never block indefinitely
/// when workers exit early — the latent producer-block in the original
/// per-endpoint worker loops.
pub struct BatchDispatcher {
    config: DispatchConfig,
}

impl BatchDispatcher {
    pub fn new() -> Self {
        Self {
            config: DispatchConfig::default(),
        }
    }

    pub fn with_config(config: DispatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Run one batch to completion.
    ///
    /// Returns one outcome per item that reached a worker, in completion
    /// order. Cancellation makes workers abandon items they have not
    /// started; those items produce no outcome. The only error is
    /// misconfiguration — item failures are outcomes, never errors.
    pub async fn run<C>(
        &self,
        items: Vec<String>,
        caller: Arc<C>,
        cancel: CancellationToken,
    ) -> Result<Vec<Outcome>>
    where
        C: RemoteCall + ?Sized + 'static,
    {
        if self.config.workers == 0 {
            return Err(Error::configuration("dispatch requires at least one worker"));
        }
        if items.is_empty() {
            return Ok(Vec::new());
        }

        let total = items.len();
        let start = Instant::now();
        tracing::debug!(items = total, workers = self.config.workers, "dispatching batch");

        // Fresh limiter per batch: limiter state never outlives this run.
        let limiter = Arc::new(RateLimiter::new(self.config.limiter.clone()));
        let collector = Arc::new(OutcomeCollector::with_capacity(total));
        let (tx, rx) = mpsc::channel::<String>(total);
        let rx = Arc::new(Mutex::new(rx));

        let mut handles = Vec::with_capacity(self.config.workers);
        for _ in 0..self.config.workers {
            let rx = Arc::clone(&rx);
            let limiter = Arc::clone(&limiter);
            let collector = Arc::clone(&collector);
            let caller = Arc::clone(&caller);
            let cancel = cancel.clone();

            handles.push(tokio::spawn(async move {
                loop {
                    // recv() returns None once the feeder dropped the
                    // sender and the buffer is drained.
                    let item = { rx.lock().await.recv().await };
                    let Some(item) = item else { break };

                    if !limiter.acquire(&cancel).await {
                        // Cancelled while waiting for a token: abandon
                        // without producing an outcome, no retry.
                        break;
                    }

                    let outcome = caller.call(&item).await;
                    collector.add(outcome);
                }
            }));
        }

        // Items are fed after the workers start. The channel holds the whole
        // batch and the send races the cancellation token, so this loop
        // cannot block past the point cancellation is observed even if every
        // worker has already exited.
        for item in items {
            if cancel.is_cancelled() {
                break;
            }
            tokio::select! {
                _ = cancel.cancelled() => break,
                res = tx.send(item) => {
                    if res.is_err() {
                        break;
                    }
                }
            }
        }
        drop(tx);

        for result in futures::future::join_all(handles).await {
            if result.is_err() {
                tracing::warn!("batch worker panicked");
            }
        }

        let outcomes = collector.drain();
        tracing::debug!(
            items = total,
            produced = outcomes.len(),
            failed = outcomes.iter().filter(|o| !o.success).count(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "batch complete"
        );
        Ok(outcomes)
    }
}

impl Default for BatchDispatcher {
    fn default() -> Self {
        Self::new()
    }
}
