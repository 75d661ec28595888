//! End-to-end pipeline tests: every request that enters produces exactly one
//! well-formed response, and each stage honors its contract.

use std::io::Write;
use std::time::Duration;

use axum::http::StatusCode;

use common::{app, app_with, body_json, body_text, get, get_with_header, test_config, MockSearch};

mod common;

#[tokio::test]
async fn root_redirects_to_docs() {
    let app = app(test_config());

    let response = get(&app, "/").await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers().get("location").unwrap(), "/docs");
}

#[tokio::test]
async fn docs_page_lists_route_groups() {
    let app = app(test_config());

    let response = get(&app, "/docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let page = body_text(response).await;
    assert!(page.contains("/v1/api/hadith/search"));
}

#[tokio::test]
async fn normalizer_defaults_remove_html_true_and_tab_home() {
    let app = app(test_config());

    let response = get(&app, "/v1/api/hadith/search?value=mercy").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["handler"], "hadithApi");
    assert_eq!(json["removeHtml"], true);
    assert_eq!(json["tab"], "home");
}

#[tokio::test]
async fn normalizer_honors_explicit_flags_case_insensitively() {
    let app = app(test_config());

    let response =
        get(&app, "/v1/api/hadith/search?value=mercy&removehtml=FALSE&specialist=True").await;
    let json = body_json(response).await;

    assert_eq!(json["removeHtml"], false);
    assert_eq!(json["tab"], "specialist");
}

#[tokio::test]
async fn normalizer_ignores_unrecognized_flag_values() {
    let app = app(test_config());

    let response =
        get(&app, "/v1/api/hadith/search?value=mercy&removehtml=no&specialist=yes").await;
    let json = body_json(response).await;

    assert_eq!(json["removeHtml"], true);
    assert_eq!(json["tab"], "home");
}

#[tokio::test]
async fn internal_flags_are_stripped_from_forwarded_query() {
    let app = app(test_config());

    let response = get(
        &app,
        "/v1/api/hadith/search?value=mercy&page=2&removehtml=false&specialist=true",
    )
    .await;
    let json = body_json(response).await;

    let params = json["params"].as_object().unwrap();
    assert_eq!(params["value"], "mercy");
    assert_eq!(params["page"], "2");
    assert!(!params.contains_key("removehtml"));
    assert!(!params.contains_key("specialist"));
}

#[tokio::test]
async fn search_without_value_is_a_400_failure() {
    let app = app(test_config());

    for uri in [
        "/v1/api/hadith/search",
        "/v1/site/hadith/search",
        "/v1/site/sharh/search",
        "/v1/site/mohdith/search",
        "/v1/site/book/search",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");

        let json = body_json(response).await;
        assert_eq!(json["status"], 400);
        assert!(json["message"].as_str().unwrap().contains("value"));
    }
}

#[tokio::test]
async fn lookup_routes_pass_the_id_through() {
    let app = app(test_config());

    let response = get(&app, "/v1/site/mohdith/256").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["handler"], "mohdithById");
    assert_eq!(json["id"], "256");
}

#[tokio::test]
async fn data_routes_serve_static_lists() {
    let app = app(test_config());

    for uri in ["/v1/data/book", "/v1/data/degree", "/v1/data/mohdith", "/v1/data/zone"] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");

        let json = body_json(response).await;
        assert!(!json.as_array().unwrap().is_empty(), "{uri}");
    }
}

#[tokio::test]
async fn unmatched_route_is_a_404_naming_the_path() {
    let app = app(test_config());

    let response = get(&app, "/v1/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["status"], 404);
    assert!(json["message"]
        .as_str()
        .unwrap()
        .contains("/v1/does-not-exist"));
}

#[tokio::test]
async fn rate_limiter_rejects_over_quota_then_window_reset_frees() {
    let mut config = test_config();
    config.rate_limit.max_requests = 2;
    config.rate_limit.window_secs = 1;
    let app = app(config);

    assert_eq!(get(&app, "/v1/data/book").await.status(), StatusCode::OK);
    assert_eq!(get(&app, "/v1/data/book").await.status(), StatusCode::OK);

    let rejected = get(&app, "/v1/data/book").await;
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);

    let json = body_json(rejected).await;
    assert_eq!(json["status"], 429);
    assert_eq!(
        json["message"],
        "Rate limit exceeded. Please try again later."
    );

    // First request of the next window succeeds again.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(get(&app, "/v1/data/book").await.status(), StatusCode::OK);
}

#[tokio::test]
async fn slow_handler_times_out_with_408_and_no_late_body() {
    let mut config = test_config();
    config.timeouts.request_ms = 100;
    let app = app_with(config, MockSearch::slow(Duration::from_secs(2)));

    let response = get(&app, "/v1/api/hadith/search?value=mercy").await;
    assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

    let json = body_json(response).await;
    assert_eq!(json["status"], 408);
    assert_eq!(json["message"], "Request timeout");
    // The mock's payload must never appear; the failure body is the
    // whole response.
    assert!(json.get("handler").is_none());
}

#[tokio::test]
async fn panicking_collaborator_still_gets_a_generic_500() {
    let app = app_with(test_config(), MockSearch::panicking());

    let response = get(&app, "/v1/api/hadith/search?value=mercy").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(response).await;
    assert_eq!(json["status"], 500);
    assert_eq!(json["message"], "Something went wrong");
}

#[tokio::test]
async fn rotating_forwarded_headers_cannot_mint_fresh_identities() {
    let mut config = test_config();
    config.rate_limit.max_requests = 2;
    let app = app(config);

    for client in ["203.0.113.1", "203.0.113.2"] {
        let response = get_with_header(&app, "/v1/data/book", "x-forwarded-for", client).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    // Without a trusted proxy the header plays no part in identity; the
    // third request from the same peer is over quota regardless.
    let rejected = get_with_header(&app, "/v1/data/book", "x-forwarded-for", "203.0.113.3").await;
    assert_eq!(rejected.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn security_headers_are_attached_to_failures_too() {
    let app = app(test_config());

    let response = get(&app, "/v1/does-not-exist").await;
    let headers = response.headers();

    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "SAMEORIGIN");
    assert!(headers.contains_key("referrer-policy"));
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn api_docs_without_artifact_lists_capabilities() {
    let app = app(test_config());

    let response = get(&app, "/api-docs").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let endpoints = json["endpoints"].as_object().unwrap();
    assert_eq!(endpoints["hadithSearch"], "/v1/api/hadith/search");
    assert_eq!(endpoints["sharhSearch"], "/v1/site/sharh/search");
    assert_eq!(endpoints["mohdithSearch"], "/v1/site/mohdith/search");
    assert_eq!(endpoints["bookSearch"], "/v1/site/book/search");
}

#[tokio::test]
async fn api_docs_with_artifact_serves_interactive_page() {
    let mut artifact = tempfile::NamedTempFile::new().unwrap();
    write!(
        artifact,
        "openapi: 3.0.0\ninfo:\n  title: Dorar Hadith API\n  version: '1.0'\npaths: {{}}\n"
    )
    .unwrap();

    let mut config = test_config();
    config.docs.openapi_path = artifact.path().to_string_lossy().into_owned();
    let app = app(config);

    let page = get(&app, "/api-docs").await;
    assert_eq!(page.status(), StatusCode::OK);
    let html = body_text(page).await;
    assert!(html.contains("Dorar Hadith API"));
    assert!(html.contains("/api-docs/openapi.json"));

    let spec = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(spec.status(), StatusCode::OK);
    let json = body_json(spec).await;
    assert_eq!(json["info"]["title"], "Dorar Hadith API");
}

#[tokio::test]
async fn openapi_json_is_404_without_artifact() {
    let app = app(test_config());

    let response = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_request_gets_exactly_one_terminal_response() {
    // Drive a mixed batch through one app instance; every request must
    // complete with a terminal, non-internal status.
    let mut config = test_config();
    config.timeouts.request_ms = 100;
    let app = app_with(config, MockSearch::default());

    let uris = [
        "/",
        "/docs",
        "/api-docs",
        "/v1/api/hadith/search?value=mercy",
        "/v1/data/degree",
        "/v1/nope",
    ];

    let mut completed = 0;
    for uri in uris {
        let response = get(&app, uri).await;
        assert!(response.status() != StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        completed += 1;
    }
    assert_eq!(completed, uris.len());
}
