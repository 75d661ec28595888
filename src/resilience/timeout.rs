//! Per-request deadline enforcement.
//!
//! # Responsibilities
//! - Bound every request with a deadline
//! - Render the 408 failure when the deadline elapses
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities; the alarm is a scheduled wakeup, never
//!   a blocking sleep
//! - Losing the race drops the in-flight handler future, so a late handler
//!   completion can never write a second response

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use axum::{
    extract::Request,
    response::{IntoResponse, Response},
};
use tower::{Layer, Service};

use crate::error::GatewayError;

/// Layer bounding each request with a deadline.
#[derive(Clone, Debug)]
pub struct RequestTimeoutLayer {
    deadline: Duration,
}

impl RequestTimeoutLayer {
    pub const fn new(deadline: Duration) -> Self {
        Self { deadline }
    }
}

impl<S> Layer<S> for RequestTimeoutLayer {
    type Service = RequestTimeout<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestTimeout {
            inner,
            deadline: self.deadline,
        }
    }
}

/// Middleware service racing the inner pipeline against the deadline.
#[derive(Clone, Debug)]
pub struct RequestTimeout<S> {
    inner: S,
    deadline: Duration,
}

impl<S> Service<Request> for RequestTimeout<S>
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
        let deadline = self.deadline;
        let mut inner = self.inner.clone();

        Box::pin(async move {
            match tokio::time::timeout(deadline, inner.call(req)).await {
                Ok(result) => result,
                Err(_elapsed) => {
                    tracing::warn!(deadline = ?deadline, "request deadline elapsed");
                    Ok(GatewayError::Timeout.into_response())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    async fn fast() -> &'static str {
        "ok"
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_millis(500)).await;
        "too late"
    }

    #[tokio::test]
    async fn fast_handler_passes_through() {
        let app = Router::new()
            .route("/", get(fast))
            .layer(RequestTimeoutLayer::new(Duration::from_millis(200)));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn slow_handler_yields_408() {
        let app = Router::new()
            .route("/", get(slow))
            .layer(RequestTimeoutLayer::new(Duration::from_millis(50)));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 408);
        assert_eq!(json["message"], "Request timeout");
    }
}
