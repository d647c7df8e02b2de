//! Request body parsing and validation

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::types::error::AppError;

/// JSON payload that has been parsed and validated
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    /// Parses `body` as JSON into `T`, then runs its validation rules
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the body is absent, not valid JSON,
    /// does not match `T`, or fails validation
    pub fn parse(body: Option<&str>) -> Result<Self, AppError> {
        let body = body
            .filter(|body| !body.trim().is_empty())
            .ok_or_else(|| AppError::BadRequest("Request body is required".to_string()))?;

        let payload: T = serde_json::from_str(body)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON payload: {e}")))?;

        payload.validate()?;

        Ok(Self(payload))
    }
}
