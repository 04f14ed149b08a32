//! Rate Limiting Middleware using GCRA Algorithm
//!
//! Per-IP rate limiting via tower_governor. The Generic Cell Rate
//! Algorithm enforces quotas without any background sweeper task,
//! which suits a service whose handlers are pure in-memory lookups.

use governor::middleware::StateInformationMiddleware;
use std::sync::Arc;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;

/// Governor config keyed on peer IP. The StateInformationMiddleware
/// parameter comes from `use_headers()`, which attaches X-RateLimit-*
/// headers to every response.
pub type DefaultGovernorConfig =
    tower_governor::governor::GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>;

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Seconds between quota replenishments
    pub per_second: u64,
    /// Burst size (max requests that can be made immediately)
    pub burst_size: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            per_second: 1,   // Replenish 1 per second
            burst_size: 30,  // Recommendation lookups are cheap reads
        }
    }
}

impl RateLimitConfig {
    /// Tighter preset for deployments exposed directly to the internet
    pub fn strict() -> Self {
        Self {
            per_second: 4,  // One request every 4 seconds
            burst_size: 5,
        }
    }
}

/// Build the governor config for `GovernorLayer`.
///
/// Keys on peer IP, so the server must be started with
/// `into_make_service_with_connect_info::<SocketAddr>()`. Responses carry
/// X-RateLimit-* headers so clients can see their remaining quota.
pub fn create_governor_config(config: &RateLimitConfig) -> Arc<DefaultGovernorConfig> {
    Arc::new(
        GovernorConfigBuilder::default()
            .per_second(config.per_second)
            .burst_size(config.burst_size)
            .use_headers()
            .finish()
            .unwrap(),
    )
}
