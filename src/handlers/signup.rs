//! POST /signup.

use crate::error::AppError;
use crate::extractors::JsonOrForm;
use crate::response::{Envelope, UserData};
use crate::service::{SignupForm, SignupService};
use crate::state::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

fn failed(e: AppError) -> Response {
    let (status, _) = e.status_and_code();
    (status, Json(Envelope::<()>::failed(e.to_string()))).into_response()
}

/// Every failure, unreadable bodies included, is reported in the envelope
/// with the status of the underlying error.
pub async fn signup(State(state): State<AppState>, body: Result<JsonOrForm<SignupForm>, AppError>) -> Response {
    let form = match body {
        Ok(JsonOrForm(form)) => form,
        Err(e) => {
            tracing::warn!(error = %e, "unreadable signup body");
            return failed(e);
        }
    };
    match SignupService::register(state.pool.as_ref(), &form).await {
        Ok(user) => (StatusCode::OK, Json(Envelope::ok(UserData { user }))).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, form = ?form, "signup failed");
            failed(e)
        }
    }
}
