//! Typed error handling for the cash card service
//!
//! # Error Categories
//!
//! - [`CashCardError`]: everything a request can fail with, mapped onto an
//!   HTTP response by its [`IntoResponse`] impl
//! - [`ValidationError`]: malformed client input (sort, page size, body)
//! - [`ConfigError`]: configuration loading and validation
//!
//! Ownership mismatches and missing records are the same [`CashCardError::NotFound`]
//! on purpose: a caller must not be able to probe which ids exist.

use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Realm advertised in `WWW-Authenticate` challenges
pub const AUTH_REALM: &str = "cashcard";

/// The main error type for cash card requests
#[derive(Debug, thiserror::Error)]
pub enum CashCardError {
    /// Record absent or owned by someone else
    #[error("cash card not found")]
    NotFound,

    /// Caller is barred from the whole resource by the configured policy
    #[error("access to cash cards is forbidden")]
    Forbidden,

    /// Missing or invalid credentials
    #[error("authentication required")]
    Unauthorized,

    #[error(transparent)]
    BadRequest(#[from] ValidationError),

    /// The store (or credential store) failed; not retried
    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Errors caused by malformed client input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("unknown sort direction '{0}', expected 'asc' or 'desc'")]
    UnknownSortDirection(String),

    #[error("page size must be a positive integer")]
    InvalidPageSize,

    #[error("invalid query string: {0}")]
    InvalidQuery(String),

    #[error("invalid request body: {0}")]
    InvalidBody(String),
}

/// Errors raised while loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ConfigError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// JSON body for 400 and 5xx responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl CashCardError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CashCardError::NotFound => StatusCode::NOT_FOUND,
            CashCardError::Forbidden => StatusCode::FORBIDDEN,
            CashCardError::Unauthorized => StatusCode::UNAUTHORIZED,
            CashCardError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CashCardError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            CashCardError::NotFound => "NOT_FOUND",
            CashCardError::Forbidden => "FORBIDDEN",
            CashCardError::Unauthorized => "UNAUTHORIZED",
            CashCardError::BadRequest(e) => e.error_code(),
            CashCardError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Body for errors that carry one; `None` for the empty-body statuses
    pub fn to_response(&self) -> Option<ErrorResponse> {
        match self {
            CashCardError::BadRequest(e) => Some(ErrorResponse {
                code: self.error_code().to_string(),
                message: e.to_string(),
            }),
            // Store details stay in the logs
            CashCardError::Storage(_) => Some(ErrorResponse {
                code: self.error_code().to_string(),
                message: "internal storage error".to_string(),
            }),
            _ => None,
        }
    }
}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::UnknownSortField(_) => "UNKNOWN_SORT_FIELD",
            ValidationError::UnknownSortDirection(_) => "UNKNOWN_SORT_DIRECTION",
            ValidationError::InvalidPageSize => "INVALID_PAGE_SIZE",
            ValidationError::InvalidQuery(_) => "INVALID_QUERY",
            ValidationError::InvalidBody(_) => "INVALID_BODY",
        }
    }
}

impl IntoResponse for CashCardError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let CashCardError::Storage(e) = &self {
            tracing::error!(error = %e, "storage operation failed");
        }

        match self.to_response() {
            Some(body) => (status, Json(body)).into_response(),
            None if status == StatusCode::UNAUTHORIZED => {
                let challenge = format!("Basic realm=\"{}\"", AUTH_REALM);
                let mut response = status.into_response();
                if let Ok(value) = HeaderValue::from_str(&challenge) {
                    response
                        .headers_mut()
                        .insert(header::WWW_AUTHENTICATE, value);
                }
                response
            }
            None => status.into_response(),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for CashCardError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        CashCardError::BadRequest(ValidationError::InvalidBody(rejection.body_text()))
    }
}

impl From<axum::extract::rejection::QueryRejection> for CashCardError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        CashCardError::BadRequest(ValidationError::InvalidQuery(rejection.body_text()))
    }
}

/// A specialized Result type for cash card operations
pub type CashCardResult<T> = Result<T, CashCardError>;
