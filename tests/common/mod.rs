//! Shared test helpers: a mock search collaborator and a router builder.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use hadith_gateway::config::GatewayConfig;
use hadith_gateway::http::GatewayServer;
use hadith_gateway::search::{SearchError, SearchRequest, SearchService};

/// Mock collaborator that echoes what the pipeline forwarded to it.
#[derive(Debug, Default)]
pub struct MockSearch {
    /// Simulated upstream latency, for timeout tests.
    pub delay: Option<Duration>,

    /// Simulated programming error on every call.
    pub panicking: bool,
}

impl MockSearch {
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn panicking() -> Self {
        Self {
            panicking: true,
            ..Self::default()
        }
    }

    async fn respond(&self, handler: &str, id: Option<&str>, req: &SearchRequest) -> Value {
        if self.panicking {
            panic!("mock collaborator blew up");
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let params: Map<String, Value> = req
            .params
            .iter()
            .map(|(k, v)| (k.clone(), Value::String(v.clone())))
            .collect();

        json!({
            "handler": handler,
            "id": id,
            "params": params,
            "removeHtml": req.remove_html,
            "tab": req.tab,
        })
    }
}

#[async_trait]
impl SearchService for MockSearch {
    async fn search_hadith_api(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("hadithApi", None, req).await)
    }

    async fn search_hadith_site(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("hadithSite", None, req).await)
    }

    async fn hadith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("hadithById", Some(id), req).await)
    }

    async fn search_sharh(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("sharhSearch", None, req).await)
    }

    async fn sharh_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("sharhById", Some(id), req).await)
    }

    async fn search_mohdith(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("mohdithSearch", None, req).await)
    }

    async fn mohdith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("mohdithById", Some(id), req).await)
    }

    async fn search_book(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("bookSearch", None, req).await)
    }

    async fn book_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        Ok(self.respond("bookById", Some(id), req).await)
    }
}

/// Config with the documentation artifact pointed at nothing, so the docs
/// toggle takes its degraded branch unless a test overrides the path.
pub fn test_config() -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.docs.openapi_path = "does-not-exist/openapi.yaml".to_string();
    config
}

/// Build the full pipeline around the default mock.
pub fn app(config: GatewayConfig) -> Router {
    app_with(config, MockSearch::default())
}

/// Build the full pipeline around a specific mock.
pub fn app_with(config: GatewayConfig, mock: MockSearch) -> Router {
    GatewayServer::new(config, Arc::new(mock)).into_router()
}

/// One GET through the whole pipeline.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// One GET with an extra request header.
pub async fn get_with_header(
    app: &Router,
    uri: &str,
    name: &'static str,
    value: &str,
) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::get(uri)
                .header(name, value)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
