//! # omni-client -- Typed Rust client for the compliance-assessment service
//!
//! Provides typed access to the two service endpoints the OmniCompliance
//! client depends on:
//! - **Policies** via `GET /policies`
//! - **Audit** via `POST /audit`
//!
//! ## Architecture
//!
//! [`OmniClient`] implements [`omni_core::ComplianceService`], the seam the
//! session logic in `omni-state` is written against. Transport, status and
//! schema failures are reported as [`OmniApiError`] and collapse into
//! [`omni_core::ServiceError`] at that seam.
//!
//! Calls are never retried and no timeout is set unless configured.

pub mod audit;
pub mod config;
pub mod error;
pub mod policies;
pub(crate) mod response;

pub use config::{ConfigError, OmniApiConfig};
pub use error::OmniApiError;

use std::time::Duration;

use omni_core::{AuditQuery, AuditResult, ComplianceService, Policy, ServiceError};

/// Top-level compliance service client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct OmniClient {
    policies: policies::PolicyClient,
    audit: audit::AuditClient,
}

impl OmniClient {
    /// Create a new client from configuration.
    pub fn new(config: &OmniApiConfig) -> Result<Self, OmniApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(|e| OmniApiError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        tracing::debug!(base_url = %config.base_url, timeout_secs = ?config.timeout_secs, "compliance client ready");

        Ok(Self {
            policies: policies::PolicyClient::new(http.clone(), config.endpoint("policies")?),
            audit: audit::AuditClient::new(http, config.endpoint("audit")?),
        })
    }

    /// Access the policy catalog client.
    pub fn policies(&self) -> &policies::PolicyClient {
        &self.policies
    }

    /// Access the audit client.
    pub fn audit(&self) -> &audit::AuditClient {
        &self.audit
    }
}

impl ComplianceService for OmniClient {
    async fn list_policies(&self) -> Result<Vec<Policy>, ServiceError> {
        Ok(self.policies.list().await?)
    }

    async fn run_audit(&self, query: &AuditQuery) -> Result<AuditResult, ServiceError> {
        Ok(self.audit.run(query).await?)
    }
}
