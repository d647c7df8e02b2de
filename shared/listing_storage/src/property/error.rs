//! Error types for property storage operations

use aws_sdk_dynamodb::error::{DisplayErrorContext, SdkError};
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use thiserror::Error;

/// Result type alias for storage operations
pub type PropertyStorageResult<T> = Result<T, PropertyStorageError>;

/// Storage error types for property operations
#[derive(Debug, Error)]
pub enum PropertyStorageError {
    /// `DynamoDB` rejected the write (permissions, missing table, validation)
    #[error("Failed to insert property into DynamoDB: {0}")]
    DynamoDbPutError(String),

    /// `DynamoDB` was unreachable, throttled the request or failed on its side
    #[error("DynamoDB temporarily unavailable: {0}")]
    Upstream(String),

    /// Failed to convert the property into a `DynamoDB` item
    #[error("Failed to serialize property: {0}")]
    SerializationError(String),
}

impl PropertyStorageError {
    /// Whether the failure is transient and originated in the service
    #[must_use]
    pub const fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

impl From<SdkError<PutItemError>> for PropertyStorageError {
    fn from(error: SdkError<PutItemError>) -> Self {
        let message = DisplayErrorContext(&error).to_string();

        match &error {
            SdkError::ServiceError(service_err)
                if service_err.raw().status().as_u16() >= 500
                    || matches!(
                        service_err.err(),
                        PutItemError::ProvisionedThroughputExceededException(_)
                            | PutItemError::RequestLimitExceeded(_)
                    ) =>
            {
                Self::Upstream(message)
            }
            SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => Self::Upstream(message),
            _ => Self::DynamoDbPutError(message),
        }
    }
}

impl From<serde_dynamo::Error> for PropertyStorageError {
    fn from(err: serde_dynamo::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}
