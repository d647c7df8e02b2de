use http::StatusCode;
use listing_storage::property::{NewProperty, PropertyRecord, PropertyStore};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::instrument;
use validator::Validate;

use crate::{
    dispatcher::ApiResponse,
    types::{AppError, ValidatedJson},
};

/// Body of `POST …/properties`
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// Listing title
    pub title: String,
    /// Asking price, any JSON number
    pub price: serde_json::Number,
    /// City the property is located in
    pub city: String,
    /// Property kind
    #[serde(rename = "type")]
    pub property_type: String,
    /// Free-form description
    pub description: String,
    /// Keys returned by the upload route; absent or falsy means none
    #[serde(default, deserialize_with = "falsy_as_empty")]
    pub image_keys: Vec<String>,
}

/// `null`, `false`, `0` and `""` read as an empty list, anything else must be
/// an array of strings
fn falsy_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null | Value::Bool(false) => Ok(Vec::new()),
        Value::Number(n) if n.as_f64() == Some(0.0) => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        other => Vec::<String>::deserialize(other).map_err(de::Error::custom),
    }
}

impl From<CreatePropertyRequest> for NewProperty {
    fn from(request: CreatePropertyRequest) -> Self {
        Self {
            title: request.title,
            price: request.price,
            city: request.city,
            property_type: request.property_type,
            description: request.description,
            image_keys: request.image_keys,
        }
    }
}

/// Body of a successful creation
#[derive(Debug, Serialize)]
pub struct PropertyCreated<'a> {
    /// Human readable confirmation
    pub message: &'static str,
    /// The record exactly as written
    pub item: &'a PropertyRecord,
}

/// Creates a property record
///
/// The record gets a fresh UUID and one timestamp for both `createdAt` and
/// `updatedAt`, then is written with a single unconditional put. Image keys
/// are stored as given; they are not checked against the bucket.
///
/// # Errors
///
/// All kinds render as `500`.
///
/// - `AppError::BadRequest` - missing body, malformed JSON, missing or
///   mistyped fields
/// - `AppError::Upstream` - `DynamoDB` unreachable or throttling
/// - `AppError::Internal` - any other write failure
#[instrument(skip(store, body))]
pub async fn create_property(
    store: &dyn PropertyStore,
    body: Option<&str>,
) -> Result<ApiResponse, AppError> {
    let ValidatedJson(payload) = ValidatedJson::<CreatePropertyRequest>::parse(body)?;

    let item = PropertyRecord::create(payload.into());

    store.put(&item).await?;

    tracing::info!(property_id = %item.property_id, "Property created");

    ApiResponse::json(
        StatusCode::CREATED,
        &PropertyCreated {
            message: "Property created successfully",
            item: &item,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_keys_default_to_empty() {
        let request: CreatePropertyRequest = serde_json::from_str(
            r#"{"title":"t","price":1,"city":"c","type":"house","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(NewProperty::from(request).image_keys, Vec::<String>::new());

        let request: CreatePropertyRequest = serde_json::from_str(
            r#"{"title":"t","price":1,"city":"c","type":"house","description":"d","imageKeys":null}"#,
        )
        .unwrap();
        assert_eq!(NewProperty::from(request).image_keys, Vec::<String>::new());
    }

    #[test]
    fn test_falsy_image_keys_are_empty() {
        for value in ["false", "0", "0.0", "\"\""] {
            let request: CreatePropertyRequest = serde_json::from_str(&format!(
                r#"{{"title":"t","price":1,"city":"c","type":"house","description":"d","imageKeys":{value}}}"#
            ))
            .unwrap();
            assert!(request.image_keys.is_empty(), "Failed for {value}");
        }
    }

    #[test]
    fn test_truthy_non_array_image_keys_are_rejected() {
        for value in ["true", "1", "\"a.jpg\"", "{}", "[1]"] {
            let result = serde_json::from_str::<CreatePropertyRequest>(&format!(
                r#"{{"title":"t","price":1,"city":"c","type":"house","description":"d","imageKeys":{value}}}"#
            ));
            assert!(result.is_err(), "Failed for {value}");
        }
    }

    #[test]
    fn test_image_keys_keep_order() {
        let request: CreatePropertyRequest = serde_json::from_str(
            r#"{"title":"t","price":1,"city":"c","type":"house","description":"d","imageKeys":["b","a"]}"#,
        )
        .unwrap();
        assert_eq!(NewProperty::from(request).image_keys, vec!["b", "a"]);
    }

    #[test]
    fn test_price_must_be_a_number() {
        let result = serde_json::from_str::<CreatePropertyRequest>(
            r#"{"title":"t","price":"cheap","city":"c","type":"house","description":"d"}"#,
        );
        assert!(result.is_err());
    }
}
