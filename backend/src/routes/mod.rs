//! Handlers for the routed operations
//!
//! Each handler receives the raw request body and the collaborator it needs,
//! and returns the success envelope or an [`AppError`](crate::types::AppError).

/// `POST …/properties`
pub mod properties;

/// `POST …/uploads/presign`
pub mod uploads;
