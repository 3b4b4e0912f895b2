use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

/// Routes address days by numeric path segments, so a key error always
/// means the day is not in the catalog.
impl From<DayKeyError> for AppError {
    fn from(err: DayKeyError) -> Self {
        Self::not_found(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

/// Reasons a `(phase, day)` pair cannot address a day in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DayKeyError {
    #[error("malformed day key '{0}'")]
    Malformed(String),
    #[error("unknown phase {0}")]
    UnknownPhase(u32),
    #[error("day {day} is outside phase {phase_id} (1..={day_count})")]
    DayOutOfRange {
        phase_id: u32,
        day: u32,
        day_count: u32,
    },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("phase catalog is empty")]
    Empty,
    #[error("phase ids must be contiguous from 1: expected {expected}, found {found}")]
    NonContiguous { expected: u32, found: u32 },
    #[error("phase {0} has no days")]
    EmptyPhase(u32),
    #[error("failed to read phase catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse phase catalog: {0}")]
    Parse(#[from] serde_json::Error),
}
