//! Request pacing for the IT Glue API
//!
//! IT Glue enforces a hard ceiling of roughly ten requests per second per API
//! key. A single [`Throttle`] is shared by every worker that fetches contact
//! details, so the realised rate is bounded by the configured ceiling no
//! matter how many workers run.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::debug;

use crate::error::{ConfigError, Result};

/// Default ceiling, one below the documented IT Glue limit
pub const DEFAULT_REQUESTS_PER_SECOND: u32 = 9;

/// Leaky-bucket pacing shared across a worker pool.
///
/// The bucket holds a single permit, so two consecutive dispatches are always
/// at least `1 / requests_per_second` apart.
pub struct Throttle {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
    interval: Duration,
}

impl Throttle {
    /// Create a throttle admitting `requests_per_second` dispatches per second.
    pub fn new(requests_per_second: u32) -> Result<Self> {
        let rate = NonZeroU32::new(requests_per_second).ok_or_else(|| {
            ConfigError::Invalid("requests_per_second must be greater than zero".to_string())
        })?;
        let interval = Duration::from_secs(1) / rate.get();

        let quota = Quota::with_period(interval)
            .ok_or_else(|| ConfigError::Invalid(format!("invalid request interval {:?}", interval)))?
            .allow_burst(NonZeroU32::MIN);

        Ok(Self {
            limiter: RateLimiter::direct(quota),
            interval,
        })
    }

    /// Minimum spacing between two dispatches
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Wait until the next dispatch is allowed.
    pub async fn acquire(&self) {
        if self.limiter.check().is_err() {
            debug!("Throttling request for {:?}", self.interval);
            self.limiter.until_ready().await;
        }
    }
}
