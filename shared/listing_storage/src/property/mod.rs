//! Property storage module for `DynamoDB` operations

mod error;

use std::sync::Arc;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use chrono::{DateTime, SecondsFormat, Utc};
pub use error::{PropertyStorageError, PropertyStorageResult};
use serde::{Deserialize, Serialize};
use serde_dynamo::to_item;
use uuid::Uuid;

/// Name of the partition key attribute of the properties table
pub const PROPERTY_ID_ATTRIBUTE: &str = "propertyId";

/// `DynamoDB` item for a property listing
///
/// The JSON shape of this struct is both the stored item and the `item`
/// returned to the caller after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyRecord {
    /// Primary key - unique property ID (UUID v4)
    pub property_id: Uuid,
    /// Listing title
    pub title: String,
    /// Asking price, stored exactly as the client sent it
    pub price: serde_json::Number,
    /// City the property is located in
    pub city: String,
    /// Property kind (house, apartment, ...)
    #[serde(rename = "type")]
    pub property_type: String,
    /// Free-form description
    pub description: String,
    /// Object keys of previously uploaded images, in display order
    pub image_keys: Vec<String>,
    /// ISO-8601 creation timestamp
    pub created_at: String,
    /// ISO-8601 last update timestamp
    pub updated_at: String,
}

/// Client supplied fields of a property that is about to be created
#[derive(Debug, Clone)]
pub struct NewProperty {
    /// Listing title
    pub title: String,
    /// Asking price
    pub price: serde_json::Number,
    /// City the property is located in
    pub city: String,
    /// Property kind
    pub property_type: String,
    /// Free-form description
    pub description: String,
    /// Object keys of previously uploaded images
    pub image_keys: Vec<String>,
}

impl PropertyRecord {
    /// Builds a fresh record with a generated ID, stamped at the current time
    #[must_use]
    pub fn create(property: NewProperty) -> Self {
        Self::create_at(property, Utc::now())
    }

    /// Builds a fresh record with a generated ID, stamped at `now`
    #[must_use]
    pub fn create_at(property: NewProperty, now: DateTime<Utc>) -> Self {
        let now = now.to_rfc3339_opts(SecondsFormat::Millis, true);

        Self {
            property_id: Uuid::new_v4(),
            title: property.title,
            price: property.price,
            city: property.city,
            property_type: property.property_type,
            description: property.description,
            image_keys: property.image_keys,
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Write access to the properties table
///
/// The backend depends on this trait rather than on `PropertyStorage` so
/// that the record store can be replaced in tests.
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Unconditionally writes `property`, replacing any item with the same ID
    ///
    /// # Errors
    ///
    /// Returns `PropertyStorageError` if the item cannot be serialized or written
    async fn put(&self, property: &PropertyRecord) -> PropertyStorageResult<()>;
}

/// Storage client for property operations
pub struct PropertyStorage {
    dynamodb_client: Arc<DynamoDbClient>,
    table_name: String,
}

impl PropertyStorage {
    /// Creates a new storage instance
    ///
    /// # Arguments
    ///
    /// * `dynamodb_client` - Pre-configured `DynamoDB` client
    /// * `table_name` - `DynamoDB` table name for properties
    #[must_use]
    pub const fn new(dynamodb_client: Arc<DynamoDbClient>, table_name: String) -> Self {
        Self {
            dynamodb_client,
            table_name,
        }
    }
}

#[async_trait]
impl PropertyStore for PropertyStorage {
    async fn put(&self, property: &PropertyRecord) -> PropertyStorageResult<()> {
        let item = to_item(property)?;

        self.dynamodb_client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await?;

        tracing::debug!(property_id = %property.property_id, "Property written");

        Ok(())
    }
}
