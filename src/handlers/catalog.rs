//! Catalog handlers: list, batch-by-id, detail and map markers.

use crate::catalog::Kind;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use std::collections::HashMap;

/// Suffix turning a collection segment into a batch lookup, e.g. `/shopsById`.
pub const BY_ID_SUFFIX: &str = "ById";

#[derive(Debug, PartialEq, Eq)]
enum Endpoint {
    List(Kind),
    Batch(Kind),
}

fn resolve(segment: &str) -> Result<Endpoint, AppError> {
    match segment.strip_suffix(BY_ID_SUFFIX) {
        Some(prefix) => Ok(Endpoint::Batch(prefix.parse()?)),
        None => Ok(Endpoint::List(segment.parse()?)),
    }
}

/// Missing or blank means the first page.
fn parse_page(raw: Option<&String>) -> Result<usize, AppError> {
    match raw.map(|s| s.trim()).filter(|s| !s.is_empty()) {
        Some(s) => s
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid page: '{}'", s))),
        None => Ok(0),
    }
}

fn parse_flag(raw: Option<&String>) -> bool {
    raw.map(|s| {
        let s = s.trim();
        s.eq_ignore_ascii_case("true") || s == "1"
    })
    .unwrap_or(false)
}

/// GET /:segment: a page of `/shops?page=&sort=&reversed=`, or a batch for `/shopsById?collection=1,2`.
pub async fn collection(
    State(state): State<AppState>,
    Path(segment): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    match resolve(&segment)? {
        Endpoint::List(kind) => {
            let page = parse_page(params.get("page"))?;
            let reversed = parse_flag(params.get("reversed"));
            let sort = params.get("sort").map(String::as_str);
            tracing::debug!(kind = %kind, page, sort = ?sort, reversed, "list");
            let listing = state.catalog.list_page(kind, page, sort, reversed)?;
            Ok(Json(listing).into_response())
        }
        Endpoint::Batch(kind) => {
            let ids = params.get("collection").map(String::as_str).unwrap_or("");
            tracing::debug!(kind = %kind, ids, "batch");
            Ok(Json(state.catalog.get_batch(kind, ids)).into_response())
        }
    }
}

/// GET /:singular/:id: the record, or JSON `null` when it does not exist.
pub async fn read(
    State(state): State<AppState>,
    Path((segment, id)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let kind: Kind = segment.parse()?;
    let record = state.catalog.get_one(kind, &id);
    if record.is_none() {
        tracing::debug!(kind = %kind, id = %id, "no such record");
    }
    Ok(Json(record).into_response())
}

/// GET /mapmarkers: every shop, unpaged.
pub async fn map_markers(State(state): State<AppState>) -> Response {
    Json(state.catalog.map_markers()).into_response()
}
