//! Per-client rate limiting middleware

use std::net::SocketAddr;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::api::state::AppState;
use crate::api::types::ApiError;
use crate::infrastructure::rate_limit::RateLimitResult;

const X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
const X_RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("x-ratelimit-remaining");

/// Enforces the configured request windows for each client address
///
/// Rejected requests get 429 with a `Retry-After` header. Every response
/// carries the limit and remaining quota of the tightest window.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(limiter) = state.rate_limiter.clone() else {
        return next.run(request).await;
    };

    let client = extract_client_ip(&request, limiter.config().trust_proxy_headers);
    let result = limiter.check_and_record(&client).await;

    if !result.allowed {
        warn!(
            client = %client,
            limit_type = ?result.limit_type,
            retry_after = result.reset_in_seconds,
            "Rate limit exceeded"
        );

        let mut response = ApiError::rate_limited(format!(
            "Rate limit exceeded. Try again in {} seconds.",
            result.reset_in_seconds
        ))
        .into_response();

        let headers = response.headers_mut();
        headers.insert(header::RETRY_AFTER, HeaderValue::from(result.reset_in_seconds));
        insert_quota_headers(headers, &result);

        return response;
    }

    let mut response = next.run(request).await;
    insert_quota_headers(response.headers_mut(), &result);
    response
}

fn insert_quota_headers(headers: &mut HeaderMap, result: &RateLimitResult) {
    headers.insert(X_RATELIMIT_LIMIT, HeaderValue::from(result.limit));
    headers.insert(X_RATELIMIT_REMAINING, HeaderValue::from(result.remaining));
}

/// Extract client IP from the peer address, or from proxy headers when trusted
fn extract_client_ip(request: &Request, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(ip) = forwarded_client_ip(request) {
            return ip;
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_client_ip(request: &Request) -> Option<String> {
    // X-Forwarded-For can contain multiple IPs, take the first one
    if let Some(first_ip) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return Some(first_ip.to_string());
    }

    request
        .headers()
        .get("x-real-ip")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with(headers: &[(&str, &str)]) -> Request {
        let mut builder = Request::builder().uri("/api/cantina/dishes");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(Body::empty()).unwrap()
    }

    fn with_peer(mut request: Request, peer: [u8; 4]) -> Request {
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from((peer, 40000))));
        request
    }

    #[test]
    fn test_forwarded_for_takes_first_entry_when_trusted() {
        let request = request_with(&[
            ("x-forwarded-for", "203.0.113.7, 10.0.0.1"),
            ("x-real-ip", "198.51.100.2"),
        ]);

        assert_eq!(extract_client_ip(&request, true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback_when_trusted() {
        let request = request_with(&[("x-real-ip", "198.51.100.2")]);
        assert_eq!(extract_client_ip(&request, true), "198.51.100.2");
    }

    #[test]
    fn test_proxy_headers_ignored_by_default() {
        let request = with_peer(
            request_with(&[
                ("x-forwarded-for", "203.0.113.7"),
                ("x-real-ip", "198.51.100.2"),
            ]),
            [192, 168, 1, 20],
        );

        assert_eq!(extract_client_ip(&request, false), "192.168.1.20");
    }

    #[test]
    fn test_peer_address_when_no_proxy_headers() {
        let request = with_peer(request_with(&[]), [192, 168, 1, 20]);
        assert_eq!(extract_client_ip(&request, true), "192.168.1.20");
    }

    #[test]
    fn test_unknown_client() {
        assert_eq!(extract_client_ip(&request_with(&[]), false), "unknown");
    }
}
