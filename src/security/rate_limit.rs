//! Fixed-window rate limiting per client IP.
//!
//! # Responsibilities
//! - One window record per client identity, reset when the window elapses
//! - Reject over-quota clients with the 429 failure
//!
//! # Design Decisions
//! - The record is the only cross-request mutable state in the gateway; the
//!   concurrent map's entry guard makes the read-increment-check-write
//!   sequence atomic per key
//! - The counter increments before the quota check, so rejected requests
//!   still count toward the window (strict lockout, matching the original
//!   policy; the window reset still frees the client)
//! - Expired records are purged opportunistically from the request path, so
//!   the map stays bounded in embedded hosts too, where no background task
//!   runs
//! - `X-Forwarded-For` is client-controlled and only consulted when the
//!   deployment declares a trusted proxy in front of the gateway

use std::{
    future::Future,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    pin::Pin,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    task::{Context, Poll},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request},
    response::{IntoResponse, Response},
};
use dashmap::DashMap;
use tower::{Layer, Service};

use crate::config::RateLimitConfig;
use crate::error::GatewayError;
use crate::observability::metrics;

/// Per-client window record.
#[derive(Debug, Clone, Copy)]
struct WindowRecord {
    count: u32,
    window_start: Instant,
}

/// Every this many quota checks, expired records are swept out.
const PURGE_EVERY: u64 = 256;

/// Shared limiter state: client identity → window record.
#[derive(Debug)]
pub struct RateLimiterState {
    records: DashMap<IpAddr, WindowRecord>,
    window: Duration,
    max_requests: u32,
    trust_proxy: bool,
    checks: AtomicU64,
}

impl RateLimiterState {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            records: DashMap::new(),
            window: Duration::from_secs(config.window_secs),
            max_requests: config.max_requests,
            trust_proxy: config.trust_proxy,
            checks: AtomicU64::new(1),
        }
    }

    /// Atomic read-increment-check-write for one client. Returns false when
    /// the client is over quota for the current window.
    pub fn check(&self, client: IpAddr) -> bool {
        if self.checks.fetch_add(1, Ordering::Relaxed) % PURGE_EVERY == 0 {
            self.purge_expired();
        }

        let now = Instant::now();
        let mut record = self.records.entry(client).or_insert(WindowRecord {
            count: 0,
            window_start: now,
        });

        if now.duration_since(record.window_start) >= self.window {
            record.count = 1;
            record.window_start = now;
            return true;
        }

        record.count += 1;
        record.count <= self.max_requests
    }

    /// Drop records whose window elapsed; called periodically so idle
    /// clients do not accumulate forever.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        let window = self.window;
        self.records
            .retain(|_, record| now.duration_since(record.window_start) < window);
    }

    #[cfg(test)]
    fn backdate(&self, client: IpAddr, by: Duration) {
        if let Some(mut record) = self.records.get_mut(&client) {
            record.window_start -= by;
        }
    }
}

/// Layer applying the fixed-window limiter.
#[derive(Clone, Debug)]
pub struct RateLimiterLayer {
    state: Arc<RateLimiterState>,
}

impl RateLimiterLayer {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self {
            state: Arc::new(RateLimiterState::new(config)),
        }
    }
}

impl<S> Layer<S> for RateLimiterLayer {
    type Service = RateLimiter<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimiter {
            inner,
            state: Arc::clone(&self.state),
        }
    }
}

/// Middleware service enforcing the per-client quota.
#[derive(Clone, Debug)]
pub struct RateLimiter<S> {
    inner: S,
    state: Arc<RateLimiterState>,
}

impl<S> Service<Request> for RateLimiter<S>
where
    S: Service<Request, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let state = Arc::clone(&self.state);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let client = client_ip(&req, state.trust_proxy);
            if state.check(client) {
                inner.call(req).await
            } else {
                tracing::warn!(client = %client, "rate limit exceeded");
                metrics::record_rate_limited();
                Ok(GatewayError::RateLimited.into_response())
            }
        })
    }
}

/// Client identity: the socket peer, falling back to loopback (in-process
/// callers without connect info). The first hop of `X-Forwarded-For` takes
/// precedence only when a trusted proxy is declared; a direct client could
/// otherwise rotate the header to mint fresh identities.
fn client_ip(req: &Request, trust_proxy: bool) -> IpAddr {
    if trust_proxy {
        if let Some(ip) = req
            .headers()
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|forwarded| forwarded.split(',').next())
            .and_then(|first| first.trim().parse().ok())
        {
            return ip;
        }
    }

    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST))
}
