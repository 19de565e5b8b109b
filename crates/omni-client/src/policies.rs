//! Typed client for the policy catalog endpoint.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET    | `/policies` | List selectable policy scopes |

use omni_core::Policy;
use url::Url;

use crate::error::OmniApiError;

/// Client for `GET /policies`.
#[derive(Debug, Clone)]
pub struct PolicyClient {
    http: reqwest::Client,
    url: Url,
}

impl PolicyClient {
    pub(crate) fn new(http: reqwest::Client, url: Url) -> Self {
        Self { http, url }
    }

    /// Fetch the full policy catalog, in service order.
    ///
    /// Calls `GET {base_url}/policies`. A non-2xx status or a body that is
    /// not a list of `{id, name}` objects is an error.
    pub async fn list(&self) -> Result<Vec<Policy>, OmniApiError> {
        let endpoint = "GET /policies";

        let resp = self
            .http
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| OmniApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        let policies: Vec<Policy> = crate::response::read_json(endpoint, resp).await?;
        tracing::debug!(count = policies.len(), "policy catalog fetched");
        Ok(policies)
    }
}
