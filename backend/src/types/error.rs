//! Universal error handling for the API

use http::StatusCode;
use listing_storage::property::PropertyStorageError;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::dispatcher::ApiResponse;
use crate::media_storage::BucketError;

/// Failure of a routed request
///
/// Every handler returns this as its error type; the dispatcher turns it
/// into the response envelope in one place. The kind only decides how the
/// failure is logged: callers always get a `500` with the raw reason.
#[derive(Debug, Error)]
pub enum AppError {
    /// The request body is missing, unparseable or fails validation
    #[error("{0}")]
    BadRequest(String),

    /// A collaborator is unreachable, throttling or failing on its side
    #[error("{0}")]
    Upstream(String),

    /// Anything else
    #[error("{0}")]
    Internal(String),
}

/// Status of every error envelope
pub const ERROR_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// `message` of every error envelope
pub const ERROR_MESSAGE: &str = "Internal Server Error";

impl AppError {
    /// Short name of the error kind, used as a log field
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::Upstream(_) => "upstream",
            Self::Internal(_) => "internal",
        }
    }

    /// Logs the error and renders it as `500 { message, error }`
    #[must_use]
    pub fn into_api_response(self) -> ApiResponse {
        let kind = self.kind();

        match self {
            Self::BadRequest(_) => tracing::warn!(kind, "Rejected request: {}", self),
            Self::Upstream(_) | Self::Internal(_) => {
                tracing::error!(kind, "Request failed: {}", self);
            }
        }

        ApiResponse::new(
            ERROR_STATUS,
            json!({
                "message": ERROR_MESSAGE,
                "error": self.to_string(),
            }),
        )
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        // Report the first failing field by name, preferring its custom message
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (field, field_errors) in fields {
            if let Some(error) = field_errors.first() {
                let reason = error
                    .message
                    .as_ref()
                    .map_or_else(|| format!("{field} is invalid"), ToString::to_string);
                return Self::BadRequest(reason);
            }
        }
        Self::BadRequest("Request validation failed".to_string())
    }
}

impl From<BucketError> for AppError {
    fn from(err: BucketError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<PropertyStorageError> for AppError {
    fn from(err: PropertyStorageError) -> Self {
        if err.is_upstream() {
            Self::Upstream(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}
