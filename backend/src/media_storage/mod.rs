//! S3-based image storage operations
mod error;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::{presigning::PresigningConfig, Client as S3Client};
use uuid::Uuid;

pub use error::{BucketError, BucketResult};

/// Key prefix under which all property images are stored
pub const UPLOAD_KEY_NAMESPACE: &str = "properties";

/// How long an issued upload URL stays valid
pub const UPLOAD_URL_EXPIRY: Duration = Duration::from_secs(60);

/// Issues time-limited write authorizations for object keys
///
/// The dispatcher only depends on this trait, so tests can swap the S3
/// signer for a fake.
#[async_trait]
pub trait UploadSigner: Send + Sync {
    /// Returns a URL that authorizes a single PUT of `key` with `content_type`
    ///
    /// # Errors
    ///
    /// Returns `BucketError` if the URL cannot be produced
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> BucketResult<String>;
}

/// Image storage client for S3 operations
pub struct MediaStorage {
    s3_client: Arc<S3Client>,
    bucket_name: String,
}

impl MediaStorage {
    /// Creates a new media storage client
    ///
    /// # Arguments
    ///
    /// * `s3_client` - Pre-configured S3 client
    /// * `bucket_name` - S3 bucket name for image storage
    #[must_use]
    pub const fn new(s3_client: Arc<S3Client>, bucket_name: String) -> Self {
        Self {
            s3_client,
            bucket_name,
        }
    }

    /// Builds a fresh object key `properties/<uuid>.<extension>` for an upload
    #[must_use]
    pub fn upload_key(file_name: &str) -> String {
        format!(
            "{UPLOAD_KEY_NAMESPACE}/{}.{}",
            Uuid::new_v4(),
            Self::file_extension(file_name)
        )
    }

    /// Everything after the last `.` of `file_name`
    ///
    /// Names without a dot yield an empty extension, so their key ends in a
    /// bare `.`.
    #[must_use]
    pub fn file_extension(file_name: &str) -> &str {
        file_name.rsplit_once('.').map_or("", |(_, extension)| extension)
    }
}

#[async_trait]
impl UploadSigner for MediaStorage {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> BucketResult<String> {
        let presigned_config = PresigningConfig::expires_in(expires_in).map_err(|e| {
            BucketError::ConfigError(format!("Failed to create presigning config: {e}"))
        })?;

        let presigned_request = self
            .s3_client
            .put_object()
            .bucket(&self.bucket_name)
            .key(key)
            .content_type(content_type)
            .presigned(presigned_config)
            .await?;

        Ok(presigned_request.uri().to_string())
    }
}
