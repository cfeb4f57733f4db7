//! Typed errors and HTTP mapping.

use crate::catalog::Kind;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors raised by the in-memory catalog.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("{kind} '{id}' not found")]
    NotFound { kind: Kind, id: String },
    #[error("unknown entity kind: {0}")]
    InvalidKind(String),
    #[error("cannot link {from} to {to}")]
    InvalidLink { from: Kind, to: Kind },
    #[error("unknown sort field: {0}")]
    UnknownSortField(String),
    #[error("{0} items but no shop, artist or company to own them")]
    Unowned(usize),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}'")]
    InvalidValue { key: &'static str, value: String },
    #[error("missing setting: {0}")]
    Missing(&'static str),
    #[error("validation: {0}")]
    Validation(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error("validation: {0}")]
    Validation(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// A request body the extractors refused, with the status they chose.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
    #[error("unavailable: {0}")]
    Unavailable(String),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::Catalog(e) => match e {
                CatalogError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
                CatalogError::InvalidKind(_) => (StatusCode::NOT_FOUND, "not_found"),
                CatalogError::InvalidLink { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "catalog_error"),
                CatalogError::UnknownSortField(_) => (StatusCode::BAD_REQUEST, "bad_request"),
                CatalogError::Unowned(_) => (StatusCode::INTERNAL_SERVER_ERROR, "catalog_error"),
            },
            AppError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            AppError::Db(e) => {
                if let sqlx::Error::RowNotFound = e {
                    (StatusCode::NOT_FOUND, "not_found")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "database_error")
                }
            }
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Rejected { status, .. } => {
                let code = match *status {
                    StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
                    StatusCode::UNPROCESSABLE_ENTITY => "validation_error",
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
                    _ => "bad_request",
                };
                (*status, code)
            }
            AppError::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable"),
        }
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
                details: None,
            },
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_errors_map_to_client_statuses() {
        let missing = AppError::from(CatalogError::NotFound { kind: Kind::Shop, id: "9".into() });
        assert_eq!(missing.status_and_code().0, StatusCode::NOT_FOUND);

        let sort = AppError::from(CatalogError::UnknownSortField("bogus".into()));
        assert_eq!(sort.status_and_code(), (StatusCode::BAD_REQUEST, "bad_request"));
        assert_eq!(sort.to_string(), "unknown sort field: bogus");
    }

    #[test]
    fn rejections_keep_their_status() {
        let err = AppError::Rejected {
            status: StatusCode::PAYLOAD_TOO_LARGE,
            message: "length limit exceeded".into(),
        };
        assert_eq!(err.status_and_code(), (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"));
        assert_eq!(err.to_string(), "length limit exceeded");
    }

    #[test]
    fn unavailable_is_503() {
        let err = AppError::Unavailable("no database".into());
        assert_eq!(err.status_and_code(), (StatusCode::SERVICE_UNAVAILABLE, "unavailable"));
    }
}
