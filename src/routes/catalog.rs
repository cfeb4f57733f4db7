//! Catalog routes. Kinds are resolved from the path segment by the handlers, so
//! `/shops`, `/headshops`, `/shopsById` and `/shop/:id` share two route patterns.

use crate::handlers::{collection, map_markers, read};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn catalog_routes(state: AppState) -> Router {
    Router::new()
        .route("/mapmarkers", get(map_markers))
        .route("/:segment", get(collection))
        .route("/:segment/", get(collection))
        .route("/:segment/:id", get(read))
        .with_state(state)
}
