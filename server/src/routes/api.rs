use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::state::AppState;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";
const JSON_CONTENT_TYPE: &str = "application/json";

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "regions": state.region_count,
        "matched": state.matched_count,
    }))
}

pub async fn get_document(State(state): State<AppState>) -> impl IntoResponse {
    bytes_response(Bytes::clone(&state.document), HTML_CONTENT_TYPE)
}

/// Serve the pre-serialized region summaries without re-encoding.
pub async fn get_regions(State(state): State<AppState>) -> impl IntoResponse {
    bytes_response(Bytes::clone(&state.regions_json), JSON_CONTENT_TYPE)
}

fn bytes_response(body: Bytes, content_type: &'static str) -> Response {
    let mut response = Response::new(Body::from(body));
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache"),
    );
    response
}
