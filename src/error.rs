use thiserror::Error;

/// Rejections raised when external values enter the domain model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unknown alert type: '{0}'")]
    UnknownAlertType(String),
    #[error("unknown alert status: '{0}'")]
    UnknownStatus(String),
    #[error("unknown widget kind: '{0}'")]
    UnknownWidgetKind(String),
    #[error("invalid date '{0}', expected YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS")]
    InvalidDate(String),
    #[error("date range start {start} is after end {end}")]
    InvertedDateRange { start: String, end: String },
}
