//! Documentation endpoints and the startup artifact toggle.
//!
//! # Responsibilities
//! - Load the OpenAPI YAML artifact once at startup (absence is not fatal)
//! - `GET /` → 302 to `/docs`
//! - `GET /docs` → static landing page
//! - `GET /api-docs` → Swagger UI when the artifact loaded, otherwise a
//!   static capability listing
//! - `GET /api-docs/openapi.json` → the loaded artifact
//!
//! # Design Decisions
//! - The artifact is an immutable `Option<Arc<Value>>` decided at process
//!   start; no per-request re-evaluation
//! - A missing or unparsable artifact degrades gracefully with a warning

use std::path::Path;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::error::GatewayError;
use crate::http::server::AppState;

/// Load the OpenAPI artifact from disk, converting YAML to JSON.
///
/// Returns `None` (with a warning) when the file is missing or unparsable;
/// the gateway keeps serving either way.
pub fn load_api_spec(path: &Path) -> Option<Value> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "OpenAPI artifact not loaded; interactive docs disabled");
            return None;
        }
    };

    match serde_yaml::from_str::<Value>(&raw) {
        Ok(spec) => {
            tracing::info!(path = %path.display(), "OpenAPI artifact loaded");
            Some(spec)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "OpenAPI artifact failed to parse; interactive docs disabled");
            None
        }
    }
}

/// `GET /` — redirect to the landing page.
pub async fn root_redirect() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, "/docs")]).into_response()
}

/// `GET /docs` — static landing page naming the route groups.
pub async fn docs_page() -> Html<&'static str> {
    Html(LANDING_PAGE)
}

/// `GET /api-docs` — Swagger UI or the capability listing, fixed at startup.
pub async fn api_docs(State(state): State<AppState>) -> Response {
    match &state.api_spec {
        Some(spec) => Html(swagger_page(spec)).into_response(),
        None => Json(capability_listing()).into_response(),
    }
}

/// `GET /api-docs/openapi.json` — the loaded artifact.
pub async fn openapi_json(State(state): State<AppState>) -> Result<Json<Value>, GatewayError> {
    state
        .api_spec
        .as_deref()
        .cloned()
        .map(Json)
        .ok_or_else(|| GatewayError::NotFound("/api-docs/openapi.json".to_string()))
}

fn capability_listing() -> Value {
    json!({
        "message": "API Documentation",
        "note": "Interactive documentation unavailable: OpenAPI artifact not loaded",
        "endpoints": {
            "hadithSearch": "/v1/api/hadith/search",
            "sharhSearch": "/v1/site/sharh/search",
            "mohdithSearch": "/v1/site/mohdith/search",
            "bookSearch": "/v1/site/book/search"
        }
    })
}

fn swagger_page(spec: &Value) -> String {
    let title = spec
        .pointer("/info/title")
        .and_then(Value::as_str)
        .unwrap_or("Hadith Gateway API");

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
  <script>
    window.onload = () => {{
      SwaggerUIBundle({{
        url: '/api-docs/openapi.json',
        dom_id: '#swagger-ui',
      }});
    }};
  </script>
</body>
</html>
"#
    )
}

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Hadith Gateway</title>
</head>
<body>
  <h1>Hadith Gateway</h1>
  <p>Search gateway for ahadith, shuruh, mohdithin, and books.</p>
  <ul>
    <li><code>GET /v1/api/hadith/search?value=...</code></li>
    <li><code>GET /v1/site/hadith/search?value=...</code></li>
    <li><code>GET /v1/site/sharh/search?value=...</code></li>
    <li><code>GET /v1/site/mohdith/search?value=...</code></li>
    <li><code>GET /v1/site/book/search?value=...</code></li>
    <li><code>GET /v1/data/book</code></li>
  </ul>
  <p>See <a href="/api-docs">/api-docs</a> for interactive documentation.</p>
</body>
</html>
"#;
