//! Rate limiting infrastructure
//!
//! Sliding window rate limiting keyed by client address.

mod limiter;

pub use limiter::{LimitType, RateLimitConfig, RateLimitResult, RateLimiter};
