//! Signup route with a request body limit.

use crate::handlers::signup;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, routing::post, Router};

pub const SIGNUP_BODY_LIMIT: usize = 16 * 1024;

/// The limit is enforced while the body is extracted, so oversized bodies
/// get the signup envelope like any other failure.
pub fn signup_routes(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .layer(DefaultBodyLimit::max(SIGNUP_BODY_LIMIT))
        .with_state(state)
}
