use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use backend::media_storage::{BucketError, BucketResult, UploadSigner};
use listing_storage::property::{
    PropertyRecord, PropertyStorageError, PropertyStorageResult, PropertyStore,
};

/// A presign call as seen by the fake signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignCall {
    pub key: String,
    pub content_type: String,
    pub expires_in: Duration,
}

/// Signer that hands out predictable URLs and records every call
#[derive(Default)]
pub struct FakeSigner {
    pub calls: Mutex<Vec<PresignCall>>,
    failure: Option<String>,
}

impl FakeSigner {
    pub fn failing(message: &str) -> Self {
        Self {
            calls: Mutex::default(),
            failure: Some(message.to_string()),
        }
    }

    pub fn calls(&self) -> Vec<PresignCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UploadSigner for FakeSigner {
    async fn presign_put(
        &self,
        key: &str,
        content_type: &str,
        expires_in: Duration,
    ) -> BucketResult<String> {
        self.calls.lock().unwrap().push(PresignCall {
            key: key.to_string(),
            content_type: content_type.to_string(),
            expires_in,
        });

        if let Some(message) = &self.failure {
            return Err(BucketError::S3Error(message.clone()));
        }

        Ok(format!(
            "https://property-images.s3.amazonaws.com/{key}?X-Amz-Expires={}",
            expires_in.as_secs()
        ))
    }
}

/// How the in-memory store should fail
#[derive(Debug, Clone)]
pub enum StoreFailure {
    Upstream(String),
    Rejected(String),
}

/// Record store backed by a vector
#[derive(Default)]
pub struct InMemoryPropertyStore {
    pub items: Mutex<Vec<PropertyRecord>>,
    failure: Option<StoreFailure>,
}

impl InMemoryPropertyStore {
    pub fn failing(failure: StoreFailure) -> Self {
        Self {
            items: Mutex::default(),
            failure: Some(failure),
        }
    }

    pub fn items(&self) -> Vec<PropertyRecord> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl PropertyStore for InMemoryPropertyStore {
    async fn put(&self, property: &PropertyRecord) -> PropertyStorageResult<()> {
        match &self.failure {
            Some(StoreFailure::Upstream(message)) => {
                Err(PropertyStorageError::Upstream(message.clone()))
            }
            Some(StoreFailure::Rejected(message)) => {
                Err(PropertyStorageError::DynamoDbPutError(message.clone()))
            }
            None => {
                let mut items = self.items.lock().unwrap();
                // Unconditional put: an existing item with the same ID is replaced
                items.retain(|item| item.property_id != property.property_id);
                items.push(property.clone());
                Ok(())
            }
        }
    }
}
