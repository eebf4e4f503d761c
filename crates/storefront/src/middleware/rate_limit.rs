//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Applied to the auth and contact-form routes, which are the only
//! unauthenticated write surfaces on the storefront.

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Key extractor that resolves the real client IP behind the proxy stack.
///
/// Checks Cloudflare's `CF-Connecting-IP` header first, then the standard
/// forwarding headers, then Fly.io's `Fly-Client-IP`.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        let candidates = [
            headers
                .get("cf-connecting-ip")
                .and_then(|v| v.to_str().ok()),
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.split(',').next()),
            headers.get("x-real-ip").and_then(|v| v.to_str().ok()),
            headers.get("fly-client-ip").and_then(|v| v.to_str().ok()),
        ];

        candidates
            .into_iter()
            .flatten()
            .find_map(|s| s.trim().parse::<IpAddr>().ok())
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for auth and contact endpoints: ~10 requests per
/// minute per IP (1 token every 6 seconds, burst of 5).
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers, which are always accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn auth_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}
