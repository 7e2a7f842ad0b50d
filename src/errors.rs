use axum::http::StatusCode;
use thiserror::Error;

/// Failures reading or writing the record store. A missing store is not one of
/// them: it loads as empty.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on record store: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error on record store: {0}")]
    Csv(#[from] csv::Error),

    #[error("record store task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Rejected submissions. Nothing is written when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("select your name before saving the checklist")]
    MissingOperator,

    #[error("select at least one activity before saving the checklist")]
    NoActivities,

    #[error("unknown operator: {0}")]
    UnknownOperator(String),

    #[error("unknown activity: {0}")]
    UnknownActivity(String),

    #[error("invalid date: {0}")]
    InvalidDate(String),
}

#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

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

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        tracing::error!("record store failure: {err}");
        Self::internal(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SubmitError> for AppError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::Validation(err) => err.into(),
            SubmitError::Store(err) => err.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
