//! Typed client for the audit endpoint.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | POST   | `/audit` | Run a compliance audit for one question |

use omni_core::{AuditQuery, AuditResult};
use url::Url;

use crate::error::OmniApiError;

/// Client for `POST /audit`.
#[derive(Debug, Clone)]
pub struct AuditClient {
    http: reqwest::Client,
    url: Url,
}

impl AuditClient {
    pub(crate) fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Submit one audit query.
    ///
    /// Calls `POST {base_url}/audit` with a JSON body. Exactly one request is
    /// sent; there is no retry.
    pub async fn run(&self, query: &AuditQuery) -> Result<AuditResult, OmniApiError> {
        let endpoint = "POST /audit";
        tracing::debug!(
            scoped = query.policy_id().is_some(),
            query_len = query.text().len(),
            "submitting audit"
        );

        let resp = self
            .http
            .post(self.url.clone())
            .json(query)
            .send()
            .await
            .map_err(|e| OmniApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        crate::response::read_json(endpoint, resp).await
    }
}
