//! Simulated token fetch with latency, failures, and retry.
//!
//! [`TokenFetcher`] stands in for an HTTP API: it waits a configured
//! latency, fails a configured fraction of calls, and otherwise returns a
//! freshly generated token set wrapped in an [`ApiResponse`]. A frozen
//! fetcher skips latency and failures entirely and returns the
//! deterministic token set with a fixed timestamp, which keeps snapshot
//! tests byte-stable.

use serde::{Deserialize, Serialize};
use tokio::time::{sleep, Duration};

use crate::Decimal;
use crate::tokens::generator::generate_tokens;
use crate::tokens::types::Token;
use crate::types::error::{PulseError, PulseResult};
use crate::types::rng::UnitRng;
use crate::types::time::{current_timestamp_ms, FROZEN_FETCH_TIMESTAMP_MS};

/// Default simulated latency in milliseconds.
pub const DEFAULT_LATENCY_MS: u64 = 800;

/// Default extra latency for a by-id detail fetch, in milliseconds.
pub const DEFAULT_DETAIL_LATENCY_MS: u64 = 300;

/// Default tokens per category: new pairs, final stretch, migrated.
pub const DEFAULT_CATEGORY_COUNTS: (usize, usize, usize) = (20, 15, 25);

/// Envelope around fetched data, mirroring a JSON API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    /// The fetched payload.
    pub data: T,
    /// Server-side timestamp of the response, in epoch milliseconds.
    pub timestamp: u64,
}

/// Fetch behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchConfig {
    /// Simulated latency per call in milliseconds.
    pub latency_ms: u64,
    /// Extra latency ahead of a by-id detail fetch, in milliseconds.
    pub detail_latency_ms: u64,
    /// Fraction of calls that fail, in `[0, 1]`.
    pub failure_rate: Decimal,
    /// Skip latency and failures and return the deterministic set with a
    /// fixed timestamp.
    pub frozen: bool,
    /// New-pairs tokens per fetch.
    pub new_pairs: usize,
    /// Final-stretch tokens per fetch.
    pub final_stretch: usize,
    /// Migrated tokens per fetch.
    pub migrated: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        let (new_pairs, final_stretch, migrated) = DEFAULT_CATEGORY_COUNTS;
        Self {
            latency_ms: DEFAULT_LATENCY_MS,
            detail_latency_ms: DEFAULT_DETAIL_LATENCY_MS,
            failure_rate: Decimal::new(1, 1),
            frozen: false,
            new_pairs,
            final_stretch,
            migrated,
        }
    }
}

impl FetchConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency.
    #[must_use]
    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    /// Sets the extra detail-fetch latency.
    #[must_use]
    pub fn with_detail_latency_ms(mut self, detail_latency_ms: u64) -> Self {
        self.detail_latency_ms = detail_latency_ms;
        self
    }

    /// Sets the failure rate.
    #[must_use]
    pub fn with_failure_rate(mut self, failure_rate: Decimal) -> Self {
        self.failure_rate = failure_rate;
        self
    }

    /// Freezes the fetcher: deterministic data, no latency, no failures.
    #[must_use]
    pub fn frozen(mut self) -> Self {
        self.frozen = true;
        self
    }

    /// Sets the tokens generated per category.
    #[must_use]
    pub fn with_category_counts(
        mut self,
        new_pairs: usize,
        final_stretch: usize,
        migrated: usize,
    ) -> Self {
        self.new_pairs = new_pairs;
        self.final_stretch = final_stretch;
        self.migrated = migrated;
        self
    }
}

/// Exponential backoff schedule for retried fetches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryConfig {
    /// Delay before the first retry, in milliseconds.
    pub initial_delay_ms: u64,
    /// Upper bound on any single delay, in milliseconds.
    pub max_delay_ms: u64,
    /// Per-retry delay multiplier.
    pub multiplier: u64,
    /// Total attempts, including the first.
    pub max_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            initial_delay_ms: 1000,
            max_delay_ms: 30_000,
            multiplier: 2,
            max_attempts: 3,
        }
    }
}

impl RetryConfig {
    /// Creates a schedule with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the total attempt count, including the first.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay before the retry following failed attempt `attempt`
    /// (zero-based), capped at the maximum.
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let scaled = self
            .initial_delay_ms
            .saturating_mul(self.multiplier.saturating_pow(attempt));
        Duration::from_millis(scaled.min(self.max_delay_ms))
    }

    /// Whether another attempt remains after failed attempt `attempt`
    /// (zero-based).
    #[must_use]
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }
}

/// Simulated token API client.
#[derive(Debug)]
pub struct TokenFetcher {
    config: FetchConfig,
    retry: RetryConfig,
    rng: UnitRng,
}

impl TokenFetcher {
    /// Creates a fetcher, validating the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::InvalidConfiguration`] if the failure rate is
    /// outside `[0, 1]`, the retry multiplier is zero, or the attempt count
    /// is zero.
    pub fn new(config: FetchConfig, retry: RetryConfig) -> PulseResult<Self> {
        if config.failure_rate < Decimal::ZERO || config.failure_rate > Decimal::ONE {
            return Err(PulseError::InvalidConfiguration(format!(
                "failure rate must be in [0, 1], got {}",
                config.failure_rate
            )));
        }
        if retry.multiplier == 0 {
            return Err(PulseError::InvalidConfiguration(
                "retry multiplier must be at least 1".to_string(),
            ));
        }
        if retry.max_attempts == 0 {
            return Err(PulseError::InvalidConfiguration(
                "retry schedule needs at least one attempt".to_string(),
            ));
        }
        Ok(Self {
            config,
            retry,
            rng: UnitRng::entropy(),
        })
    }

    /// Creates a frozen fetcher with the default configuration.
    ///
    /// Never fails at construction: the frozen defaults are always valid.
    #[must_use]
    pub fn frozen() -> Self {
        Self {
            config: FetchConfig::new().frozen(),
            retry: RetryConfig::default(),
            rng: UnitRng::entropy(),
        }
    }

    /// Returns the fetch configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Returns the retry schedule.
    #[must_use]
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    /// Performs a single fetch.
    ///
    /// # Errors
    ///
    /// Returns [`PulseError::FetchFailed`] when the simulated failure roll
    /// lands under the configured rate. Frozen fetchers never fail.
    pub async fn fetch(&self) -> PulseResult<ApiResponse<Vec<Token>>> {
        if self.config.frozen {
            return Ok(ApiResponse {
                data: self.generate(true),
                timestamp: FROZEN_FETCH_TIMESTAMP_MS,
            });
        }

        sleep(Duration::from_millis(self.config.latency_ms)).await;
        if self.rng.next_unit() < self.config.failure_rate {
            return Err(PulseError::FetchFailed(
                "failed to fetch token data".to_string(),
            ));
        }
        Ok(ApiResponse {
            data: self.generate(false),
            timestamp: current_timestamp_ms(),
        })
    }

    /// Fetches a single token by id, for a detail view.
    ///
    /// Regenerates the full set and returns the matching token, or `None`
    /// if no generated token carries that id. The extra detail latency is
    /// paid ahead of the full fetch latency; frozen fetchers skip both.
    ///
    /// # Errors
    ///
    /// Same failure surface as [`fetch`](Self::fetch): the inner fetch can
    /// roll a simulated failure outside frozen mode.
    pub async fn fetch_token(&self, id: &str) -> PulseResult<ApiResponse<Option<Token>>> {
        if !self.config.frozen {
            sleep(Duration::from_millis(self.config.detail_latency_ms)).await;
        }
        let response = self.fetch().await?;
        let token = response.data.into_iter().find(|t| t.id == id);
        Ok(ApiResponse {
            data: token,
            timestamp: response.timestamp,
        })
    }

    /// Fetches with exponential backoff between failed attempts.
    ///
    /// # Errors
    ///
    /// Returns the last attempt's [`PulseError::FetchFailed`] once the
    /// schedule is exhausted.
    pub async fn fetch_with_retry(&self) -> PulseResult<ApiResponse<Vec<Token>>> {
        let mut attempt = 0;
        loop {
            match self.fetch().await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::debug!(attempt, "fetch succeeded after retry");
                    }
                    return Ok(response);
                }
                Err(err) if self.retry.should_retry(attempt) => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    tracing::warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "fetch failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    tracing::warn!(attempt, error = %err, "fetch failed, giving up");
                    return Err(err);
                }
            }
        }
    }

    fn generate(&self, deterministic: bool) -> Vec<Token> {
        generate_tokens(
            self.config.new_pairs,
            self.config.final_stretch,
            self.config.migrated,
            deterministic,
        )
    }
}
