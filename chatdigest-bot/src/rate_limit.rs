use std::num::NonZeroU32;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};

pub type PostRateLimiter = DefaultDirectRateLimiter;

/// One post per `min_interval`, no bursts. A zero interval falls back to one
/// post per second.
pub fn post_limiter(min_interval: Duration) -> PostRateLimiter {
    let quota = Quota::with_period(min_interval)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(NonZeroU32::MIN);

    RateLimiter::direct(quota)
}
