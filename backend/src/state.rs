//! Process-wide collaborator wiring

use std::sync::Arc;

use aws_sdk_dynamodb::Client as DynamoDbClient;
use aws_sdk_s3::Client as S3Client;
use listing_storage::property::PropertyStorage;

use crate::{dispatcher::Dispatcher, media_storage::MediaStorage, types::Environment};

/// Builds the S3 and `DynamoDB` clients once and wires them into a dispatcher
///
/// # Panics
///
/// Panics if a required setting is missing for the environment
pub async fn build_dispatcher(environment: &Environment) -> Dispatcher {
    let aws_config = environment.aws_config().await;

    let s3_client = Arc::new(S3Client::from_conf(
        environment.s3_client_config(&aws_config),
    ));
    let dynamodb_client = Arc::new(DynamoDbClient::new(&aws_config));

    let media_storage = Arc::new(MediaStorage::new(s3_client, environment.s3_bucket()));
    let property_storage = Arc::new(PropertyStorage::new(
        dynamodb_client,
        environment.table_name(),
    ));

    tracing::info!(
        region = %environment.aws_region(),
        table = %environment.table_name(),
        bucket = %environment.s3_bucket(),
        "Collaborators initialized"
    );

    Dispatcher::new(media_storage, property_storage)
}
