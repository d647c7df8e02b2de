//! Record storage for the property listing service
//!
//! This crate owns the persisted property record and the `DynamoDB` table
//! operations the backend performs on it.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

pub mod property;
