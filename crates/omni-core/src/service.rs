//! # Compliance Service Seam
//!
//! The remote service is an external collaborator. Session logic is written
//! against this trait; `omni-client` provides the HTTP implementation and
//! tests provide scripted ones.

use std::future::Future;

use crate::audit::{AuditQuery, AuditResult};
use crate::error::ServiceError;
use crate::policy::Policy;

/// The two calls the client makes against the compliance service.
///
/// Implementations perform exactly one network exchange per call and never
/// retry.
pub trait ComplianceService {
    /// `GET /policies`: the full, ordered policy catalog.
    fn list_policies(&self) -> impl Future<Output = Result<Vec<Policy>, ServiceError>>;

    /// `POST /audit`: run one audit and return the verdict.
    fn run_audit(
        &self,
        query: &AuditQuery,
    ) -> impl Future<Output = Result<AuditResult, ServiceError>>;
}
