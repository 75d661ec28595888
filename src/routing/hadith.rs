//! Hadith search route group.

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde_json::Value;

use crate::error::GatewayError;
use crate::http::request::RequestContext;
use crate::http::server::AppState;
use crate::search::SearchRequest;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/hadith/search", get(search_api))
        .route("/site/hadith/search", get(search_site))
        .route("/site/hadith/{id}", get(by_id))
}

async fn search_api(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let req = SearchRequest::for_search(params, &ctx)?;
    Ok(Json(state.search.search_hadith_api(&req).await?))
}

async fn search_site(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let req = SearchRequest::for_search(params, &ctx)?;
    Ok(Json(state.search.search_hadith_site(&req).await?))
}

async fn by_id(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let req = SearchRequest::for_lookup(params, &ctx);
    Ok(Json(state.search.hadith_by_id(&id, &req).await?))
}
