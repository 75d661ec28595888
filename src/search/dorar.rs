//! Reqwest-backed client for the dorar.net search backend.
//!
//! # Responsibilities
//! - Translate `SearchRequest`s into upstream GET requests
//! - Forward query parameters untouched (internal flags were stripped earlier)
//! - Optionally strip the `<em>` highlight markup from API payloads
//!
//! # Design Decisions
//! - One shared `reqwest::Client` with connection pooling
//! - Upstream errors carry detail for the log, never for the client body
//! - No parsing of upstream HTML beyond highlight stripping; this client is
//!   glue, not a scraper

use async_trait::async_trait;
use serde_json::{json, Value};
use url::Url;

use crate::search::{SearchError, SearchRequest, SearchService};

/// Thin HTTP client over the dorar.net API and site endpoints.
#[derive(Debug, Clone)]
pub struct DorarClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DorarClient {
    /// Create a client for the given base URL (e.g. `https://dorar.net`).
    pub fn new(base_url: &str) -> Result<Self, SearchError> {
        let base_url =
            Url::parse(base_url).map_err(|e| SearchError::Upstream(format!("bad base url: {e}")))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    fn endpoint(&self, path: &str, req: &SearchRequest) -> Result<Url, SearchError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|e| SearchError::Upstream(format!("bad endpoint {path}: {e}")))?;
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in &req.params {
                // dorar's search endpoints use `skey`; everything else passes through.
                if key == "value" {
                    query.append_pair("skey", value);
                } else {
                    query.append_pair(key, value);
                }
            }
        }
        Ok(url)
    }

    async fn get_json(&self, path: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        let url = self.endpoint(path, req)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SearchError::Upstream(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(format!("GET {url}: status {status}")));
        }

        let mut payload: Value = response
            .json()
            .await
            .map_err(|e| SearchError::Upstream(format!("GET {url}: invalid JSON: {e}")))?;

        if req.remove_html {
            strip_highlights(&mut payload);
        }
        Ok(payload)
    }

    async fn get_page(&self, path: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        let url = self.endpoint(path, req)?;
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| SearchError::Upstream(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Upstream(format!("GET {url}: status {status}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| SearchError::Upstream(format!("GET {url}: {e}")))?;

        Ok(json!({ "tab": req.tab, "html": html }))
    }
}

/// Remove the `<em>` markers dorar uses to highlight matched terms.
fn strip_highlights(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains("<em>") {
                *s = s.replace("<em>", "").replace("</em>", "");
            }
        }
        Value::Array(items) => items.iter_mut().for_each(strip_highlights),
        Value::Object(map) => map.values_mut().for_each(strip_highlights),
        _ => {}
    }
}

#[async_trait]
impl SearchService for DorarClient {
    async fn search_hadith_api(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_json("/dorar_api.json", req).await
    }

    async fn search_hadith_site(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page("/hadith/search", req).await
    }

    async fn hadith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page(&format!("/hadith/{id}"), req).await
    }

    async fn search_sharh(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page("/hadith/sharh-search", req).await
    }

    async fn sharh_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page(&format!("/hadith/sharh/{id}"), req).await
    }

    async fn search_mohdith(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page("/hadith/mohdith-search", req).await
    }

    async fn mohdith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page(&format!("/mohdith/{id}"), req).await
    }

    async fn search_book(&self, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page("/hadith/book-search", req).await
    }

    async fn book_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError> {
        self.get_page(&format!("/book/{id}"), req).await
    }
}
