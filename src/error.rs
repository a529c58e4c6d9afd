use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;

/// Why a single field failed validation.
///
/// This is the whole failure catalog: the validator never produces anything
/// outside it and never aborts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldFailure {
    Missing,
    TooShort { min: usize },
    WrongFormat,
    OutOfRange { min: i64, max: i64 },
}

impl fmt::Display for FieldFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFailure::Missing => write!(f, "missing"),
            FieldFailure::TooShort { min } => write!(f, "too short (minimum {} characters)", min),
            FieldFailure::WrongFormat => write!(f, "wrong format"),
            FieldFailure::OutOfRange { min, max } => write!(f, "out of range ({}-{})", min, max),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    Configuration(String),
    Io(std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Configuration(e) => write!(f, "Configuration error: {}", e),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Io(e) => Some(e),
            AppError::Configuration(_) => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Generic 500 body; `detail` is only included when the caller allows it
pub fn internal_error_response(detail: Option<&str>) -> (StatusCode, Json<serde_json::Value>) {
    let body = match detail {
        Some(message) => json!({
            "error": "Something went wrong!",
            "message": message
        }),
        None => json!({ "error": "Something went wrong!" }),
    };
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body))
}
