//! Upstream search collaborator.
//!
//! The gateway does not implement search itself; route handlers delegate to
//! an injected [`SearchService`] and forward whatever it returns. The trait
//! is the seam that keeps the handlers thin and lets tests substitute a mock.

pub mod dorar;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::http::request::{AudienceTab, RequestContext};

pub use dorar::DorarClient;

/// Failure raised by the search collaborator.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request cannot be forwarded as-is (missing/empty search text).
    #[error("{0}")]
    InvalidQuery(String),

    /// The upstream could not be reached or answered abnormally.
    #[error("{0}")]
    Upstream(String),
}

/// A normalized search request forwarded to the collaborator.
///
/// Built from the already-normalized query string, so the internal
/// `removehtml`/`specialist` flags never appear in `params`.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Query parameters to forward upstream, in arrival order.
    pub params: Vec<(String, String)>,

    /// Strip HTML markup from upstream payloads.
    pub remove_html: bool,

    /// Which audience tab the results target.
    pub tab: AudienceTab,
}

impl SearchRequest {
    /// Build a request for a search route, requiring a non-empty `value`
    /// parameter.
    pub fn for_search(
        params: Vec<(String, String)>,
        ctx: &RequestContext,
    ) -> Result<Self, SearchError> {
        let has_value = params
            .iter()
            .any(|(k, v)| k == "value" && !v.trim().is_empty());
        if !has_value {
            return Err(SearchError::InvalidQuery(
                "The search query text (value) cannot be empty".to_string(),
            ));
        }
        Ok(Self::for_lookup(params, ctx))
    }

    /// Build a request for a lookup route (by-id, data); no `value` required.
    pub fn for_lookup(params: Vec<(String, String)>, ctx: &RequestContext) -> Self {
        Self {
            params,
            remove_html: ctx.remove_html,
            tab: ctx.tab,
        }
    }

    /// The forwarded search text, when present.
    pub fn value(&self) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == "value")
            .map(|(_, v)| v.as_str())
    }
}

/// Port to the content-search backend.
///
/// Each method corresponds to one route; implementations produce a JSON
/// payload or a [`SearchError`], never an HTTP response.
#[async_trait]
pub trait SearchService: Send + Sync {
    /// Search ahadith through the upstream JSON API.
    async fn search_hadith_api(&self, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Search ahadith through the upstream site.
    async fn search_hadith_site(&self, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Fetch one hadith by its upstream identifier.
    async fn hadith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Search sharh (commentary) entries.
    async fn search_sharh(&self, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Fetch one sharh by its upstream identifier.
    async fn sharh_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Search mohdith (scholar) entries.
    async fn search_mohdith(&self, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Fetch one mohdith by its upstream identifier.
    async fn mohdith_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Search book entries.
    async fn search_book(&self, req: &SearchRequest) -> Result<Value, SearchError>;

    /// Fetch one book by its upstream identifier.
    async fn book_by_id(&self, id: &str, req: &SearchRequest) -> Result<Value, SearchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> RequestContext {
        RequestContext {
            remove_html: true,
            for_specialist: false,
            tab: AudienceTab::Home,
        }
    }

    #[test]
    fn for_search_requires_value() {
        let err = SearchRequest::for_search(vec![("page".into(), "2".into())], &ctx());
        assert!(matches!(err, Err(SearchError::InvalidQuery(_))));
    }

    #[test]
    fn for_search_rejects_blank_value() {
        let err = SearchRequest::for_search(vec![("value".into(), "   ".into())], &ctx());
        assert!(err.is_err());
    }

    #[test]
    fn for_search_accepts_value() {
        let req =
            SearchRequest::for_search(vec![("value".into(), "الصلاة".into())], &ctx()).unwrap();
        assert_eq!(req.value(), Some("الصلاة"));
        assert!(req.remove_html);
        assert_eq!(req.tab, AudienceTab::Home);
    }

    #[test]
    fn for_lookup_needs_no_value() {
        let req = SearchRequest::for_lookup(vec![], &ctx());
        assert!(req.value().is_none());
    }
}
