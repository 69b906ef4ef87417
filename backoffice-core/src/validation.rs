use serde::Serialize;

use crate::error::HttpError;

/// A field-level validation error.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    pub code: String,
}

/// Container for validation errors, used as the payload of `HttpError::Validation`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl From<&garde::Report> for ValidationErrorResponse {
    fn from(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let field = {
                    let s = path.to_string();
                    if s.is_empty() { "value".to_string() } else { s }
                };
                FieldError {
                    field,
                    message: error.message().to_string(),
                    code: "validation".to_string(),
                }
            })
            .collect();
        ValidationErrorResponse { errors }
    }
}

impl From<garde::Report> for HttpError {
    fn from(report: garde::Report) -> Self {
        HttpError::Validation(ValidationErrorResponse::from(&report))
    }
}

/// Validate `value` against `context`, converting a failed report into an `HttpError`.
pub fn validate_with<T: garde::Validate>(value: &T, context: &T::Context) -> Result<(), HttpError> {
    value.validate_with(context).map_err(HttpError::from)
}

// Re-export garde::Validate for convenience.
pub use garde::Validate;
