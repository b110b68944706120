//! Provider-call pacing as explicit, clock-injected state.
//!
//! The scraping side of the pipeline talks to a trial-tier stats API: at
//! most one request every 1.1 s, HTTP 429 honored via `Retry-After`, and a
//! 1000-calls-per-30-days quota. The old module-level "time of last call"
//! variable is replaced by objects that own a `Clock`, so the whole policy
//! is testable without wall-clock sleeps. No HTTP lives here — the transport
//! layer asks these objects what to do and reports back what happened.

use std::time::Duration;

use thiserror::Error;
use tracing::warn;

/// Minimum spacing between provider calls.
pub const MIN_CALL_SPACING: Duration = Duration::from_millis(1100);
/// Retry budget for rate-limited calls before giving up.
pub const MAX_RETRIES: u32 = 3;
/// Fallback backoff when a 429 carries no `Retry-After`: 15 s × attempt.
const BACKOFF_STEP: Duration = Duration::from_secs(15);

/// Trial quota: calls allowed per rolling window.
pub const QUOTA_LIMIT: u32 = 1000;
pub const QUOTA_WINDOW: Duration = Duration::from_secs(30 * 24 * 60 * 60);
/// Usage fraction at which the tracker starts warning.
const QUOTA_WARN_FRACTION: f64 = 0.8;

/// Monotonic time source. Production uses [`SystemClock`]; tests drive a
/// manual clock forward explicitly.
pub trait Clock {
    /// Monotonic time since an arbitrary epoch.
    fn now(&self) -> Duration;
}

#[derive(Debug, Default)]
pub struct SystemClock {
    origin: std::sync::OnceLock<std::time::Instant>,
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        let origin = self.origin.get_or_init(std::time::Instant::now);
        origin.elapsed()
    }
}

#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("provider kept rate-limiting after {0} retries")]
    RetriesExhausted(u32),
}

/// Spacing + retry policy for one provider client instance.
pub struct RateLimiter<C: Clock> {
    clock: C,
    last_call: Option<Duration>,
    attempts: u32,
}

impl<C: Clock> RateLimiter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            last_call: None,
            attempts: 0,
        }
    }

    /// How long the caller must wait before the next call. Zero when the
    /// spacing window has already elapsed (or no call was made yet).
    pub fn wait_before_call(&self) -> Duration {
        match self.last_call {
            None => Duration::ZERO,
            Some(last) => {
                let elapsed = self.clock.now().saturating_sub(last);
                MIN_CALL_SPACING.saturating_sub(elapsed)
            }
        }
    }

    /// Record that a call was sent just now.
    pub fn record_call(&mut self) {
        self.last_call = Some(self.clock.now());
    }

    /// The call succeeded; the retry budget resets.
    pub fn on_success(&mut self) {
        self.attempts = 0;
    }

    /// The provider answered 429. Returns how long to back off before the
    /// retry — the `Retry-After` value when present, otherwise an
    /// escalating fallback — or an error once the budget is spent.
    pub fn on_rate_limited(
        &mut self,
        retry_after: Option<Duration>,
    ) -> Result<Duration, RateLimitError> {
        self.attempts += 1;
        if self.attempts > MAX_RETRIES {
            self.attempts = 0;
            return Err(RateLimitError::RetriesExhausted(MAX_RETRIES));
        }
        let backoff = retry_after.unwrap_or(BACKOFF_STEP * self.attempts);
        warn!(
            attempt = self.attempts,
            backoff_secs = backoff.as_secs(),
            "provider rate-limited the call"
        );
        Ok(backoff)
    }
}

/// Where a client stands against its rolling-window quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaStatus {
    pub used: u32,
    pub remaining: u32,
    /// True at or past the warning fraction of the quota.
    pub warning: bool,
    /// True when the quota is fully spent.
    pub exhausted: bool,
}

/// Counts calls against a rolling window (trial tier: 1000 per 30 days).
pub struct QuotaTracker<C: Clock> {
    clock: C,
    limit: u32,
    window: Duration,
    calls: std::collections::VecDeque<Duration>,
    warned: bool,
}

impl<C: Clock> QuotaTracker<C> {
    pub fn new(clock: C) -> Self {
        Self::with_limits(clock, QUOTA_LIMIT, QUOTA_WINDOW)
    }

    pub fn with_limits(clock: C, limit: u32, window: Duration) -> Self {
        Self {
            clock,
            limit,
            window,
            calls: std::collections::VecDeque::new(),
            warned: false,
        }
    }

    /// Log one call and report the quota position. Calls older than the
    /// window roll off the front.
    pub fn register_call(&mut self) -> QuotaStatus {
        let now = self.clock.now();
        self.calls.push_back(now);
        let cutoff = now.saturating_sub(self.window);
        while self.calls.front().map(|&t| t < cutoff).unwrap_or(false) {
            self.calls.pop_front();
            // Usage dropped below the window; allow a fresh warning later.
            self.warned = false;
        }

        let used = self.calls.len() as u32;
        let warning = used as f64 >= self.limit as f64 * QUOTA_WARN_FRACTION;
        if warning && !self.warned {
            warn!(used, limit = self.limit, "approaching provider call quota");
            self.warned = true;
        }
        QuotaStatus {
            used,
            remaining: self.limit.saturating_sub(used),
            warning,
            exhausted: used >= self.limit,
        }
    }
}
