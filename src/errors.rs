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

    pub fn conflict(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
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

impl From<DateKeyError> for AppError {
    fn from(err: DateKeyError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("deposit must be a finite number >= 0, got {0}")]
    InvalidDeposit(f64),
}

#[derive(Debug, Error, PartialEq)]
#[error("date key must be a calendar date in YYYY-MM-DD form, got {0:?}")]
pub struct DateKeyError(pub String);

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to encode journal: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to write journal: {0}")]
    Io(#[from] std::io::Error),
}
