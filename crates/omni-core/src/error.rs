//! # Error Types
//!
//! `QueryError` covers locally rejected input. `ServiceError` is the failure
//! taxonomy at the service boundary: every failed call to the compliance
//! service collapses into exactly one of its variants, and its `Display`
//! output is the plain-text message shown to the user.

use thiserror::Error;

/// Input rejected before any network call is made.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// The audit question is empty.
    #[error("query text must not be empty")]
    EmptyQuery,

    /// A policy id was given but is the empty string.
    #[error("policy id must not be empty; omit the scope to search all policies")]
    EmptyPolicyId,
}

/// A failed call to the compliance service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The request never produced an HTTP response (connectivity, timeout,
    /// body read failure).
    #[error("{message}")]
    Transport { message: String },

    /// The service answered with a non-2xx status.
    #[error("Server Error: {status_text}")]
    Status { code: u16, status_text: String },

    /// A 2xx response whose body did not match the expected shape.
    #[error("unexpected response shape from {endpoint}: {message}")]
    Schema { endpoint: String, message: String },
}

impl ServiceError {
    /// Whether the failure is a response-shape mismatch.
    pub fn is_schema(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}
