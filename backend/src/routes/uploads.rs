use http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use validator::Validate;

use crate::{
    dispatcher::ApiResponse,
    media_storage::{MediaStorage, UploadSigner, UPLOAD_URL_EXPIRY},
    types::{AppError, ValidatedJson},
};

/// Body of `POST …/uploads/presign`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    /// Client side file name, only its extension is kept
    #[validate(length(min = 1, message = "fileName must not be empty"))]
    pub file_name: String,
    /// MIME type the upload must be sent with
    #[validate(length(min = 1, message = "contentType must not be empty"))]
    pub content_type: String,
}

/// Time-limited permission to upload one object
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadAuthorization {
    /// Presigned URL to PUT the object to
    pub upload_url: String,
    /// Object key to reference from a property's `imageKeys`
    pub key: String,
}

/// Creates a presigned URL for uploading a property image
///
/// 1. Derives a fresh `properties/<uuid>.<ext>` key from the file name
/// 2. Asks the signer for a PUT URL scoped to that key and content type,
///    valid for 60 seconds
///
/// Nothing is stored; the URL simply stops working once it expires.
///
/// # Errors
///
/// All kinds render as `500`.
///
/// - `AppError::BadRequest` - missing body, malformed JSON, empty `fileName`
///   or `contentType`
/// - `AppError::Internal` - the signer failed to produce a URL
#[instrument(skip(signer, body))]
pub async fn create_presigned_upload_url(
    signer: &dyn UploadSigner,
    body: Option<&str>,
) -> Result<ApiResponse, AppError> {
    let ValidatedJson(payload) = ValidatedJson::<PresignRequest>::parse(body)?;

    let key = MediaStorage::upload_key(&payload.file_name);

    let upload_url = signer
        .presign_put(&key, &payload.content_type, UPLOAD_URL_EXPIRY)
        .await?;

    tracing::info!(key = %key, content_type = %payload.content_type, "Issued upload URL");

    ApiResponse::json(StatusCode::OK, &UploadAuthorization { upload_url, key })
}
