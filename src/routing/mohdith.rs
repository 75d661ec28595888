//! Mohdith (scholar) search route group.

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
        .route("/site/mohdith/search", get(search))
        .route("/site/mohdith/{id}", get(by_id))
}

async fn search(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let req = SearchRequest::for_search(params, &ctx)?;
    Ok(Json(state.search.search_mohdith(&req).await?))
}

async fn by_id(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Value>, GatewayError> {
    let req = SearchRequest::for_lookup(params, &ctx);
    Ok(Json(state.search.mohdith_by_id(&id, &req).await?))
}
