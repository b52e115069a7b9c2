use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone)]
pub struct RateLimiterSnapshot {
    pub refill_interval: Duration,
    pub burst: u32,
    pub tokens: f64,
    /// Estimated wait until a token is available, if currently empty.
    pub estimated_wait: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// One token is granted per interval.
    pub refill_interval: Duration,
    /// Maximum tokens the bucket holds (burst allowance).
    pub burst: u32,
}

impl RateLimiterConfig {
    pub fn new() -> Self {
        Self {
            refill_interval: Duration::from_millis(300),
            burst: 2,
        }
    }

    pub fn with_refill_interval(mut self, interval: Duration) -> Self {
        self.refill_interval = interval;
        self
    }

    pub fn with_burst(mut self, burst: u32) -> Self {
        self.burst = burst.max(1);
        self
    }
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
struct State {
    tokens: f64,
    last: Instant,
}

/// Token-bucket rate limiter shared by all workers in one batch.
///
/// The bucket starts full, so up to `burst` calls go out immediately;
/// afterwards one token accrues per refill interval. A zero interval means
/// unlimited. Safe for concurrent use; token grants are FIFO-ish with no
/// stronger fairness guarantee among waiting workers.
pub struct RateLimiter {
    cfg: RateLimiterConfig,
    state: Mutex<State>,
}

impl RateLimiter {
    pub fn new(cfg: RateLimiterConfig) -> Self {
        let state = Mutex::new(State {
            tokens: cfg.burst as f64,
            last: Instant::now(),
        });
        Self { cfg, state }
    }

    fn refill_locked(cfg: &RateLimiterConfig, st: &mut State) {
        let now = Instant::now();
        let elapsed = now.duration_since(st.last).as_secs_f64();
        let interval = cfg.refill_interval.as_secs_f64();
        if elapsed > 0.0 && interval > 0.0 {
            st.tokens = (st.tokens + elapsed / interval).min(cfg.burst as f64);
            st.last = now;
        }
    }

    /// Acquire one token, sleeping until one is available.
    ///
    /// Returns `false` if `cancel` fires first; the caller must abandon the
    /// in-flight item without retrying. Cancellation here is a normal
    /// abandonment, not an error.
    pub async fn acquire(&self, cancel: &CancellationToken) -> bool {
        let cfg = &self.cfg;
        if cfg.refill_interval.is_zero() {
            return !cancel.is_cancelled();
        }

        loop {
            // An already-cancelled batch never gets a token, even if one
            // is available.
            if cancel.is_cancelled() {
                return false;
            }

            let wait = {
                let mut st = self.state.lock().await;
                Self::refill_locked(cfg, &mut st);
                if st.tokens >= 1.0 {
                    st.tokens -= 1.0;
                    return true;
                }
                let missing = 1.0 - st.tokens;
                Duration::from_secs_f64(missing * cfg.refill_interval.as_secs_f64())
            };

            tokio::select! {
                _ = cancel.cancelled() => return false,
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    /// Take a token without waiting; `true` on success.
    pub async fn try_acquire(&self) -> bool {
        if self.cfg.refill_interval.is_zero() {
            return true;
        }
        let mut st = self.state.lock().await;
        Self::refill_locked(&self.cfg, &mut st);
        if st.tokens >= 1.0 {
            st.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    pub async fn snapshot(&self) -> RateLimiterSnapshot {
        let cfg = &self.cfg;
        let mut st = self.state.lock().await;
        Self::refill_locked(cfg, &mut st);

        let estimated_wait = if !cfg.refill_interval.is_zero() && st.tokens < 1.0 {
            let missing = 1.0 - st.tokens;
            Some(Duration::from_secs_f64(
                missing * cfg.refill_interval.as_secs_f64(),
            ))
        } else {
            None
        };

        RateLimiterSnapshot {
            refill_interval: cfg.refill_interval,
            burst: cfg.burst,
            tokens: st.tokens,
            estimated_wait,
        }
    }
}
