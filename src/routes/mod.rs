//! Route tables and the assembled application router.

mod catalog;
mod common;
mod signup;

pub use catalog::catalog_routes;
pub use common::common_routes;
pub use signup::{signup_routes, SIGNUP_BODY_LIMIT};

use crate::response::error_body;
use crate::state::AppState;
use axum::{
    http::{header, HeaderName, Method, StatusCode},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

/// Headers browsers may send cross-origin.
pub const CORS_ALLOWED_HEADERS: [HeaderName; 4] = [
    header::ORIGIN,
    HeaderName::from_static("x-requested-with"),
    header::CONTENT_TYPE,
    header::ACCEPT,
];

/// Permissive CORS: any origin, the form/JSON headers the web client sends.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(CORS_ALLOWED_HEADERS)
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(error_body("not_found", "no such route".into(), None)),
    )
}

/// Full application: common, signup and catalog routes behind CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(signup_routes(state.clone()))
        .merge(catalog_routes(state))
        .fallback(not_found)
        .layer(cors_layer())
}
