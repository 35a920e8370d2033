use axum::Router;
use axum::routing::get;
use tower_http::compression::CompressionLayer;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::api::get_document))
        .route("/api/regions", get(routes::api::get_regions))
        .route("/api/health", get(routes::api::health))
        .layer(CompressionLayer::new())
        .with_state(state)
}
