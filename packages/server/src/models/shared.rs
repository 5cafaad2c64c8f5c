use serde::Serialize;

use crate::error::AppError;

/// Body returned by operations that only report an outcome.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Session deleted.")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Return the trimmed value, or a validation error if it is absent or blank.
pub fn require_name(value: Option<&str>, message: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(AppError::Validation(message.into())),
    }
}

/// Trimmed value for operations where an absent name simply matches nothing.
pub fn optional_name(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
