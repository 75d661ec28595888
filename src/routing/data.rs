//! Data route group: static reference lists used to build search filters.
//!
//! These lists mirror the upstream's fixed taxonomies; they are served
//! locally and never touch the search collaborator.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::http::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data/book", get(books))
        .route("/data/degree", get(degrees))
        .route("/data/mohdith", get(mohdiths))
        .route("/data/zone", get(zones))
}

async fn books() -> Json<Value> {
    Json(json!([
        { "key": 6216, "value": "صحيح البخاري" },
        { "key": 3088, "value": "صحيح مسلم" },
        { "key": 13113, "value": "سنن أبي داود" },
        { "key": 33861, "value": "سنن الترمذي" },
        { "key": 32078, "value": "سنن النسائي" },
        { "key": 13457, "value": "سنن ابن ماجه" },
        { "key": 96, "value": "مسند الإمام أحمد" },
        { "key": 16315, "value": "موطأ الإمام مالك" }
    ]))
}

async fn degrees() -> Json<Value> {
    Json(json!([
        { "key": 0, "value": "أحاديث صحيحة" },
        { "key": 1, "value": "أحاديث حسنة" },
        { "key": 2, "value": "أحاديث ضعيفة" },
        { "key": 3, "value": "أحاديث موضوعة" }
    ]))
}

async fn mohdiths() -> Json<Value> {
    Json(json!([
        { "key": 256, "value": "البخاري" },
        { "key": 261, "value": "مسلم" },
        { "key": 1420, "value": "الألباني" },
        { "key": 852, "value": "ابن حجر العسقلاني" },
        { "key": 676, "value": "النووي" },
        { "key": 748, "value": "الذهبي" }
    ]))
}

async fn zones() -> Json<Value> {
    Json(json!([
        { "key": 0, "value": "كل الأبواب" },
        { "key": 1, "value": "متون الأحاديث" },
        { "key": 2, "value": "أسانيد الأحاديث" },
        { "key": 3, "value": "شروح الأحاديث" }
    ]))
}
