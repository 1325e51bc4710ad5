//! Sliding window rate limiter

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Request limits per window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
    /// Key clients by `X-Forwarded-For`/`X-Real-IP` instead of the peer address
    pub trust_proxy_headers: bool,
}

impl RateLimitConfig {
    pub fn new(requests_per_second: u32, requests_per_minute: u32, requests_per_hour: u32) -> Self {
        Self {
            requests_per_second,
            requests_per_minute,
            requests_per_hour,
            trust_proxy_headers: false,
        }
    }

    /// Only enable behind a reverse proxy that overwrites the forwarding headers
    pub fn with_trusted_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }

    /// Effectively no limits
    pub fn unlimited() -> Self {
        Self::new(u32::MAX, u32::MAX, u32::MAX)
    }

    fn windows(&self) -> [(LimitType, u32); 3] {
        [
            (LimitType::PerSecond, self.requests_per_second),
            (LimitType::PerMinute, self.requests_per_minute),
            (LimitType::PerHour, self.requests_per_hour),
        ]
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(10, 100, 1000)
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    /// Whether the request is allowed
    pub allowed: bool,
    /// Remaining requests in the most constrained window
    pub remaining: u32,
    /// Limit of the most constrained window
    pub limit: u32,
    /// Time until the limit resets (in seconds)
    pub reset_in_seconds: u64,
    /// Which limit was hit (if any)
    pub limit_type: Option<LimitType>,
}

/// Type of rate limit that was hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitType {
    PerSecond,
    PerMinute,
    PerHour,
}

impl LimitType {
    fn window(&self) -> Duration {
        match self {
            Self::PerSecond => Duration::from_secs(1),
            Self::PerMinute => Duration::from_secs(60),
            Self::PerHour => Duration::from_secs(3600),
        }
    }
}

impl std::fmt::Display for LimitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerSecond => write!(f, "per_second"),
            Self::PerMinute => write!(f, "per_minute"),
            Self::PerHour => write!(f, "per_hour"),
        }
    }
}

/// Rate limiter keyed by an arbitrary client identifier
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Per-client request timestamps
    records: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    /// Cleanup interval
    cleanup_interval: Duration,
    /// Last cleanup time
    last_cleanup: Arc<RwLock<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            records: Arc::new(RwLock::new(HashMap::new())),
            cleanup_interval: Duration::from_secs(300),
            last_cleanup: Arc::new(RwLock::new(Instant::now())),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Check if a request is allowed without recording it
    pub async fn check(&self, key: &str) -> RateLimitResult {
        let records = self.records.read().await;
        self.calculate_limits(records.get(key), Instant::now())
    }

    /// Check and record in one operation; rejected requests are not recorded
    pub async fn check_and_record(&self, key: &str) -> RateLimitResult {
        self.maybe_cleanup().await;

        let now = Instant::now();
        let mut records = self.records.write().await;

        let result = self.calculate_limits(records.get(key), now);

        if result.allowed {
            records.entry(key.to_string()).or_default().push(now);
        }

        result
    }

    /// Reset rate limits for a key
    pub async fn reset(&self, key: &str) {
        let mut records = self.records.write().await;
        records.remove(key);
    }

    /// Number of clients with tracked requests
    pub async fn tracked_keys(&self) -> usize {
        self.records.read().await.len()
    }

    fn calculate_limits(&self, records: Option<&Vec<Instant>>, now: Instant) -> RateLimitResult {
        let records: &[Instant] = records.map(Vec::as_slice).unwrap_or(&[]);

        let mut tightest: Option<(LimitType, u32, u32)> = None;

        for (limit_type, limit) in self.config.windows() {
            let window = limit_type.window();
            let since = now.checked_sub(window).unwrap_or(now);
            let in_window = records.iter().filter(|t| **t > since);
            let count = in_window.clone().count() as u32;

            if count >= limit {
                let oldest = in_window.min().copied();

                let reset_in = oldest
                    .map(|t| {
                        let elapsed = now.duration_since(t);
                        window.saturating_sub(elapsed).as_secs_f64().ceil() as u64
                    })
                    .unwrap_or(window.as_secs())
                    .max(1);

                return RateLimitResult {
                    allowed: false,
                    remaining: 0,
                    limit,
                    reset_in_seconds: reset_in,
                    limit_type: Some(limit_type),
                };
            }

            let remaining = limit - count - 1;

            if tightest.is_none_or(|(_, _, r)| remaining < r) {
                tightest = Some((limit_type, limit, remaining));
            }
        }

        let (limit_type, limit, remaining) =
            tightest.unwrap_or((LimitType::PerMinute, self.config.requests_per_minute, 0));

        RateLimitResult {
            allowed: true,
            remaining,
            limit,
            reset_in_seconds: limit_type.window().as_secs(),
            limit_type: None,
        }
    }

    async fn maybe_cleanup(&self) {
        let should_cleanup = {
            let last = self.last_cleanup.read().await;
            last.elapsed() >= self.cleanup_interval
        };

        if should_cleanup {
            let mut last = self.last_cleanup.write().await;
            *last = Instant::now();

            let now = Instant::now();
            let cutoff = now
                .checked_sub(LimitType::PerHour.window())
                .unwrap_or(now);

            let mut records = self.records.write().await;

            for timestamps in records.values_mut() {
                timestamps.retain(|t| *t > cutoff);
            }

            records.retain(|_, v| !v.is_empty());
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}
