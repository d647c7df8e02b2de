//! Property listing backend
//!
//! Routes two operations: issuing presigned S3 upload URLs for property
//! images, and persisting property records in `DynamoDB`.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

/// Request routing and response envelope
pub mod dispatcher;

/// AWS Lambda entry point adapter
pub mod lambda;

/// S3 presigned upload URLs
pub mod media_storage;

/// Operation handlers
pub mod routes;

/// HTTP server
pub mod server;

/// Collaborator wiring
pub mod state;

/// Configuration, errors and extractors
pub mod types;
