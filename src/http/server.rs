//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with every pipeline stage in order
//! - Wire up middleware (trace, request ID, security headers, CORS, panic
//!   stage, timeout, body limit, rate limiter, normalizer)
//! - Bind the server to a listener in standalone mode
//! - Expose the bare router for embedded hosting
//!
//! # Middleware Order
//! Outermost to innermost: request ID → trace → security headers → CORS →
//! panic stage → timeout → body limit → rate limiter → normalizer → route
//! groups → fallback. Every failure propagates as a `GatewayError` and is
//! rendered by the error stage exactly once; a panic below the panic stage
//! is converted there instead of killing the request.

use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::http::{docs, request};
use crate::observability::metrics;
use crate::resilience::RequestTimeoutLayer;
use crate::routing;
use crate::search::SearchService;
use crate::security::{RateLimiterLayer, SecurityHeadersLayer};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Upstream search collaborator.
    pub search: Arc<dyn SearchService>,

    /// OpenAPI artifact loaded at startup; gates the docs toggle.
    pub api_spec: Option<Arc<Value>>,
}

/// HTTP server for the gateway.
pub struct GatewayServer {
    router: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Create a new server: load the documentation artifact, assemble the
    /// pipeline, and freeze the configuration.
    pub fn new(config: GatewayConfig, search: Arc<dyn SearchService>) -> Self {
        let api_spec =
            docs::load_api_spec(Path::new(&config.docs.openapi_path)).map(Arc::new);

        let state = AppState { search, api_spec };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(docs::root_redirect))
            .route("/docs", get(docs::docs_page))
            .route("/api-docs", get(docs::api_docs))
            .route("/api-docs/openapi.json", get(docs::openapi_json))
            .nest("/v1", routing::v1_router())
            .fallback(routing::not_found)
            .with_state(state)
            .layer(
                // Innermost group. The panic stage sits at its top so an
                // escaped panic anywhere below still becomes the generic
                // internal failure; each ServiceBuilder applies top-down.
                ServiceBuilder::new()
                    .layer(CatchPanicLayer::custom(handle_panic))
                    .layer(RequestTimeoutLayer::new(Duration::from_millis(
                        config.timeouts.request_ms,
                    )))
                    .layer(DefaultBodyLimit::max(config.limits.body_bytes))
                    .layer(RateLimiterLayer::new(&config.rate_limit))
                    .layer(middleware::from_fn(request::normalize_request)),
            )
            .layer(
                // Outermost group, wrapping the one above.
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(middleware::from_fn(metrics::track_requests))
                    .layer(SecurityHeadersLayer::new())
                    .layer(CorsLayer::permissive()),
            )
    }

    /// Run the server, accepting connections on the given listener until the
    /// shutdown signal fires. Standalone mode only.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "gateway listening");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await;

        tracing::info!("gateway stopped");
        result
    }

    /// The assembled pipeline as a callable router, for embedded hosting.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Terminal stage for a panic escaping a handler or collaborator: keep the
/// payload for the server-side log, answer with the generic internal body.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "non-string panic payload".to_string()
    };
    GatewayError::Internal(format!("panicked: {detail}")).into_response()
}
