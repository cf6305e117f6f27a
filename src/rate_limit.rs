//! Fixed-window rate limiting for the contact endpoint.
//!
//! Each client identity (IP + truncated User-Agent) maps to a request count
//! and a window-reset timestamp. Entries are created lazily, reset when the
//! window expires, and reaped by a whole-store sweep at the start of every
//! check. The store is process-local: under multi-instance deployment each
//! instance keeps its own counters, so the effective global limit is
//! `max_requests x instance_count`. Exact enforcement would need a shared
//! external store, which is out of scope; the store trait below is the seam
//! where one would plug in.

use crate::config::Config;
use crate::server::AppState;
use axum::{
    extract::{Request, State},
    http::{header::USER_AGENT, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::warn;

/// How much of the User-Agent string participates in the client identity.
const USER_AGENT_PREFIX_LEN: usize = 50;

#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(15 * 60),
            max_requests: 5,
        }
    }
}

impl RateLimitConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            window: config.rate_limit_window,
            max_requests: config.rate_limit_max_requests,
        }
    }
}

/// One client's counter within the current window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitEntry {
    pub count: u32,
    /// Unix milliseconds at which the window resets
    pub reset_at_ms: i64,
}

/// Storage seam for rate-limit entries.
///
/// The in-memory implementation below serves single-instance deployments;
/// multi-instance correctness would need an external key-value store behind
/// the same three operations.
pub trait RateLimitStore: Send + Sync {
    fn get(&self, identifier: &str) -> Option<RateLimitEntry>;
    fn set(&self, identifier: &str, entry: RateLimitEntry);
    /// Remove every entry whose window has already reset.
    fn sweep(&self, now_ms: i64);
}

/// Process-local store backed by a mutex-guarded map.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, RateLimitEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

impl RateLimitStore for MemoryStore {
    fn get(&self, identifier: &str) -> Option<RateLimitEntry> {
        self.entries.lock().unwrap().get(identifier).copied()
    }

    fn set(&self, identifier: &str, entry: RateLimitEntry) {
        self.entries
            .lock()
            .unwrap()
            .insert(identifier.to_string(), entry);
    }

    fn sweep(&self, now_ms: i64) {
        self.entries
            .lock()
            .unwrap()
            .retain(|_, entry| entry.reset_at_ms > now_ms);
    }
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    /// Unix milliseconds at which this client's window resets
    pub reset_at_ms: i64,
}

pub struct RateLimiter {
    config: RateLimitConfig,
    store: Box<dyn RateLimitStore>,
    // Serializes the check-and-increment sequence across tokio workers
    check_lock: Mutex<()>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig, store: Box<dyn RateLimitStore>) -> Self {
        Self {
            config,
            store,
            check_lock: Mutex::new(()),
        }
    }

    pub fn in_memory(config: RateLimitConfig) -> Self {
        Self::new(config, Box::new(MemoryStore::new()))
    }

    pub fn config(&self) -> RateLimitConfig {
        self.config
    }

    /// Check-and-increment for one client identity.
    ///
    /// Sweeps expired entries, then creates a fresh entry if none exists or
    /// the window has reset; the count is incremented only when the request
    /// is allowed.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        self.check_at(identifier, Utc::now().timestamp_millis())
    }

    fn check_at(&self, identifier: &str, now_ms: i64) -> RateLimitDecision {
        let _guard = self.check_lock.lock().unwrap();

        self.store.sweep(now_ms);

        let mut entry = match self.store.get(identifier) {
            Some(entry) if entry.reset_at_ms > now_ms => entry,
            _ => RateLimitEntry {
                count: 0,
                reset_at_ms: now_ms + self.config.window.as_millis() as i64,
            },
        };

        let allowed = entry.count < self.config.max_requests;
        if allowed {
            entry.count += 1;
        }
        self.store.set(identifier, entry);

        RateLimitDecision {
            allowed,
            remaining: self.config.max_requests.saturating_sub(entry.count),
            reset_at_ms: entry.reset_at_ms,
        }
    }
}

/// Client identity: IP plus the first 50 characters of the User-Agent.
///
/// The IP comes from `X-Forwarded-For` (first hop) or `X-Real-IP`; behind
/// no proxy at all we fall back to a shared "unknown" bucket.
pub fn client_identifier(headers: &HeaderMap) -> String {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|value| value.to_str().ok())
        })
        .unwrap_or("unknown");

    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    let truncated: String = user_agent.chars().take(USER_AGENT_PREFIX_LEN).collect();

    format!("{}-{}", ip, truncated)
}

/// Seconds until a reset timestamp, rounded up, never negative.
fn seconds_until(reset_at_ms: i64, now_ms: i64) -> i64 {
    ((reset_at_ms - now_ms).max(0) + 999) / 1000
}

fn apply_rate_limit_headers(response: &mut Response, limit: u32, decision: &RateLimitDecision) {
    let headers = response.headers_mut();
    headers.insert(
        "x-ratelimit-limit",
        HeaderValue::from_str(&limit.to_string()).unwrap_or(HeaderValue::from_static("0")),
    );
    headers.insert(
        "x-ratelimit-remaining",
        HeaderValue::from_str(&decision.remaining.to_string())
            .unwrap_or(HeaderValue::from_static("0")),
    );
    headers.insert(
        "x-ratelimit-reset",
        HeaderValue::from_str(&(decision.reset_at_ms / 1000).to_string())
            .unwrap_or(HeaderValue::from_static("0")),
    );
}

/// Axum middleware wrapping the contact endpoint.
///
/// Disallowed requests short-circuit with 429 plus `Retry-After`; allowed
/// requests run the handler and carry the same `X-RateLimit-*` headers.
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let identifier = client_identifier(request.headers());
    let decision = state.limiter.check(&identifier);
    let limit = state.limiter.config().max_requests;

    if !decision.allowed {
        warn!("Rate limit exceeded for {}", identifier);

        let retry_after = seconds_until(decision.reset_at_ms, Utc::now().timestamp_millis());
        let mut response = (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests. Please try again later." })),
        )
            .into_response();
        response.headers_mut().insert(
            "retry-after",
            HeaderValue::from_str(&retry_after.to_string())
                .unwrap_or(HeaderValue::from_static("0")),
        );
        apply_rate_limit_headers(&mut response, limit, &decision);
        return response;
    }

    let mut response = next.run(request).await;
    apply_rate_limit_headers(&mut response, limit, &decision);
    response
}
