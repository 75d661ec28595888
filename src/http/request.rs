//! Request normalization.
//!
//! # Responsibilities
//! - Derive the per-request `RequestContext` from the raw query string
//! - Strip the internal `removehtml`/`specialist` flags from the query
//!   forwarded to route handlers
//!
//! # Design Decisions
//! - The context is attached as a request extension; downstream stages read
//!   it, never mutate it
//! - Flag parsing is a pure function of the raw parameter values so the
//!   contract is unit-testable without a server

use axum::{
    body::Body,
    extract::Request,
    http::Uri,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

/// Which audience a search result set targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceTab {
    Home,
    Specialist,
}

impl AudienceTab {
    /// Pure function of the specialist flag.
    pub fn from_specialist(for_specialist: bool) -> Self {
        if for_specialist {
            Self::Specialist
        } else {
            Self::Home
        }
    }
}

/// Per-request normalized flags, created once by the normalizer and
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Strip HTML from upstream payloads. Default true; false only when the
    /// client sent `removehtml=false` (any case).
    pub remove_html: bool,

    /// The client asked for specialist results (`specialist=true`, any case).
    pub for_specialist: bool,

    /// Audience tab derived from `for_specialist`.
    pub tab: AudienceTab,
}

impl RequestContext {
    fn new(remove_html_raw: Option<&str>, specialist_raw: Option<&str>) -> Self {
        let remove_html = parse_remove_html(remove_html_raw);
        let for_specialist = parse_specialist(specialist_raw);
        Self {
            remove_html,
            for_specialist,
            tab: AudienceTab::from_specialist(for_specialist),
        }
    }
}

/// `removehtml` defaults to true; only an explicit `"false"` disables it.
fn parse_remove_html(raw: Option<&str>) -> bool {
    !matches!(raw, Some(v) if v.eq_ignore_ascii_case("false"))
}

/// `specialist` defaults to false; only an explicit `"true"` enables it.
fn parse_specialist(raw: Option<&str>) -> bool {
    matches!(raw, Some(v) if v.eq_ignore_ascii_case("true"))
}

/// Normalizer middleware: derive the context, then rewrite the request URI
/// without the two consumed parameters so handlers never see them.
pub async fn normalize_request(mut req: Request<Body>, next: Next) -> Response {
    let mut remove_html_raw = None;
    let mut specialist_raw = None;
    let mut retained: Vec<(String, String)> = Vec::new();

    if let Some(query) = req.uri().query() {
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "removehtml" => remove_html_raw = Some(value.into_owned()),
                "specialist" => specialist_raw = Some(value.into_owned()),
                _ => retained.push((key.into_owned(), value.into_owned())),
            }
        }
    }

    let ctx = RequestContext::new(remove_html_raw.as_deref(), specialist_raw.as_deref());
    req.extensions_mut().insert(ctx);

    if remove_html_raw.is_some() || specialist_raw.is_some() {
        if let Some(uri) = rewrite_uri(req.uri(), &retained) {
            *req.uri_mut() = uri;
        }
    }

    next.run(req).await
}

/// Rebuild the URI with only the retained query pairs.
fn rewrite_uri(uri: &Uri, retained: &[(String, String)]) -> Option<Uri> {
    let path = uri.path();
    let path_and_query = if retained.is_empty() {
        path.to_string()
    } else {
        let query = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(retained)
            .finish();
        format!("{path}?{query}")
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = path_and_query.parse().ok();
    Uri::from_parts(parts).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remove_html_defaults_to_true() {
        assert!(parse_remove_html(None));
    }

    #[test]
    fn remove_html_false_any_case() {
        assert!(!parse_remove_html(Some("false")));
        assert!(!parse_remove_html(Some("FALSE")));
        assert!(!parse_remove_html(Some("False")));
    }

    #[test]
    fn remove_html_other_values_stay_true() {
        assert!(parse_remove_html(Some("true")));
        assert!(parse_remove_html(Some("0")));
        assert!(parse_remove_html(Some("no")));
        assert!(parse_remove_html(Some("")));
    }

    #[test]
    fn specialist_defaults_to_false() {
        assert!(!parse_specialist(None));
    }

    #[test]
    fn specialist_true_any_case() {
        assert!(parse_specialist(Some("true")));
        assert!(parse_specialist(Some("TRUE")));
        assert!(parse_specialist(Some("True")));
    }

    #[test]
    fn specialist_other_values_stay_false() {
        assert!(!parse_specialist(Some("false")));
        assert!(!parse_specialist(Some("1")));
        assert!(!parse_specialist(Some("yes")));
    }

    #[test]
    fn tab_follows_specialist_flag() {
        assert_eq!(AudienceTab::from_specialist(true), AudienceTab::Specialist);
        assert_eq!(AudienceTab::from_specialist(false), AudienceTab::Home);
    }

    #[test]
    fn context_combines_both_flags() {
        let ctx = RequestContext::new(Some("false"), Some("TRUE"));
        assert!(!ctx.remove_html);
        assert!(ctx.for_specialist);
        assert_eq!(ctx.tab, AudienceTab::Specialist);
    }

    #[test]
    fn rewrite_uri_drops_consumed_params() {
        let uri: Uri = "/v1/api/hadith/search?value=mercy&removehtml=false"
            .parse()
            .unwrap();
        let rewritten = rewrite_uri(&uri, &[("value".into(), "mercy".into())]).unwrap();
        assert_eq!(rewritten.path(), "/v1/api/hadith/search");
        assert_eq!(rewritten.query(), Some("value=mercy"));
    }

    #[test]
    fn rewrite_uri_handles_empty_query() {
        let uri: Uri = "/v1/data/book?specialist=true".parse().unwrap();
        let rewritten = rewrite_uri(&uri, &[]).unwrap();
        assert_eq!(rewritten.query(), None);
    }
}
