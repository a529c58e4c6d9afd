use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing::warn;

use crate::config::RateLimitConfig;

/// Content-Security-Policy sent with every response
pub const CONTENT_SECURITY_POLICY: &str = "default-src 'self'; \
style-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net; \
script-src 'self' 'unsafe-inline' https://cdn.jsdelivr.net https://platform.twitter.com https://cdnjs.cloudflare.com; \
img-src 'self' data: https:; \
font-src 'self' https://cdn.jsdelivr.net; \
connect-src 'self'; \
frame-src https://platform.twitter.com https://www.facebook.com";

pub const RATE_LIMIT_MESSAGE: &str = "Too many requests from this IP, please try again later.";

/// Adds the standard security headers unless a handler already set them
pub async fn headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    add_header(headers, header::CONTENT_SECURITY_POLICY, CONTENT_SECURITY_POLICY);
    add_header(headers, header::X_CONTENT_TYPE_OPTIONS, "nosniff");
    add_header(headers, header::X_FRAME_OPTIONS, "SAMEORIGIN");
    add_header(headers, header::REFERRER_POLICY, "no-referrer");
    add_header(
        headers,
        HeaderName::from_static("permissions-policy"),
        "geolocation=(), microphone=(), camera=()",
    );
    add_header(headers, HeaderName::from_static("x-dns-prefetch-control"), "off");

    response
}

fn add_header(headers: &mut HeaderMap, name: HeaderName, value: &'static str) {
    if !headers.contains_key(&name) {
        headers.insert(name, HeaderValue::from_static(value));
    }
}

/// TCP peer address recorded by `into_make_service_with_connect_info`
pub fn peer_addr(request: &Request) -> Option<String> {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0.ip().to_string())
}

/// Client address claimed by a reverse proxy: first `X-Forwarded-For` entry, then `X-Real-IP`
pub fn forwarded_addr(request: &Request) -> Option<String> {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|raw| {
            raw.split(',')
                .map(str::trim)
                .find(|part| !part.is_empty())
                .map(str::to_string)
        });
    if forwarded.is_some() {
        return forwarded;
    }

    request
        .headers()
        .get("x-real-ip")
        .and_then(|v| v.to_str().ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Who sent the request. Proxy headers count only when `trust_proxy_headers` is set.
pub fn client_addr(request: &Request, trust_proxy_headers: bool) -> Option<String> {
    if trust_proxy_headers {
        if let Some(addr) = forwarded_addr(request) {
            return Some(addr);
        }
    }
    peer_addr(request)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateDecision {
    pub allowed: bool,
    pub limit: usize,
    pub remaining: usize,
    /// Time until the oldest counted request leaves the window
    pub retry_after: Duration,
}

#[derive(Debug)]
struct Hits {
    clients: HashMap<String, VecDeque<Instant>>,
    last_sweep: Instant,
}

/// Sliding-window request counter keyed by client address
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    window: Duration,
    trust_proxy_headers: bool,
    hits: Mutex<Hits>,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        RateLimiter {
            max_requests: config.max_requests,
            window: Duration::from_secs(config.window_secs),
            trust_proxy_headers: config.trust_proxy_headers,
            hits: Mutex::new(Hits {
                clients: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    /// Key the request is counted under
    pub fn client_key(&self, request: &Request) -> String {
        client_addr(request, self.trust_proxy_headers).unwrap_or_else(|| "unknown".to_string())
    }

    pub fn check(&self, client: &str) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> RateDecision {
        // A poisoned map only ever holds timestamps; keep counting with it
        let mut hits = self
            .hits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Once per window, forget clients whose newest hit has expired
        if now.saturating_duration_since(hits.last_sweep) >= self.window {
            let window = self.window;
            hits.clients.retain(|_, queue| {
                queue
                    .back()
                    .is_some_and(|newest| now.saturating_duration_since(*newest) < window)
            });
            hits.last_sweep = now;
        }

        let entry = hits.clients.entry(client.to_string()).or_default();
        entry.retain(|ts| now.saturating_duration_since(*ts) < self.window);

        let allowed = entry.len() < self.max_requests;
        if allowed {
            entry.push_back(now);
        }

        let retry_after = entry
            .front()
            .map(|oldest| self.window.saturating_sub(now.saturating_duration_since(*oldest)))
            .unwrap_or_default();

        RateDecision {
            allowed,
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.len()),
            retry_after,
        }
    }

    #[cfg(test)]
    fn tracked_clients(&self) -> usize {
        self.hits
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clients
            .len()
    }
}

/// Rejects `/api` callers that exceed their window with 429
pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let client = limiter.client_key(&request);
    let decision = limiter.check(&client);

    let mut response = if decision.allowed {
        next.run(request).await
    } else {
        warn!(target: "rate_limit", client = %client, path = %request.uri().path(), "rate limit exceeded");
        let mut response = (StatusCode::TOO_MANY_REQUESTS, RATE_LIMIT_MESSAGE).into_response();
        let retry_secs = decision.retry_after.as_secs().max(1);
        if let Ok(value) = HeaderValue::from_str(&retry_secs.to_string()) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        response
    };

    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("x-ratelimit-limit"),
        HeaderValue::from(decision.limit),
    );
    headers.insert(
        HeaderName::from_static("x-ratelimit-remaining"),
        HeaderValue::from(decision.remaining),
    );

    response
}
