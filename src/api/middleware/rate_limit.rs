//! Per-client rate limiting using the token bucket algorithm.

use axum::Router;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer,
    governor::{GovernorConfig, GovernorConfigBuilder},
    key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor},
};

/// Token bucket parameters.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    /// Seconds between token replenishments.
    pub per_second: u64,
    pub burst_size: u32,
}

/// Public endpoints: redirects, resolution and health.
pub const PUBLIC: Limits = Limits {
    per_second: 1,
    burst_size: 100,
};

/// Authenticated endpoints that mutate or list links.
pub const SECURE: Limits = Limits {
    per_second: 2,
    burst_size: 20,
};

fn config<K: KeyExtractor>(
    limits: Limits,
    key_extractor: K,
) -> Arc<GovernorConfig<K, NoOpMiddleware<QuantaInstant>>> {
    Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(key_extractor)
            .per_second(limits.per_second)
            .burst_size(limits.burst_size)
            .finish()
            .expect("rate limits are non-zero"),
    )
}

/// Applies a per-IP rate limiter to `router`.
///
/// When `behind_proxy` is set the client IP is taken from `X-Forwarded-For`,
/// `X-Real-IP` or `Forwarded`, falling back to the peer address; otherwise only
/// the peer address is used. Requests over the limit get `429 Too Many Requests`.
pub fn apply<S>(router: Router<S>, limits: Limits, behind_proxy: bool) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    if behind_proxy {
        router.layer(GovernorLayer::new(config(limits, SmartIpKeyExtractor)))
    } else {
        router.layer(GovernorLayer::new(config(limits, PeerIpKeyExtractor)))
    }
}
