//! Shared response handling for compliance service calls.
//!
//! Each endpoint is one exchange: status check, body read, schema decode.
//! The three stages map onto the three non-config [`OmniApiError`] variants.

use serde::de::DeserializeOwned;

use crate::error::{error_chain, OmniApiError};

/// The reason phrase the server sent, falling back to the canonical phrase
/// for the status code and then to the bare code.
pub(crate) fn status_text(resp: &reqwest::Response) -> String {
    if let Some(phrase) = resp.extensions().get::<hyper::ext::ReasonPhrase>() {
        let phrase = String::from_utf8_lossy(phrase.as_bytes());
        if !phrase.trim().is_empty() {
            return phrase.into_owned();
        }
    }
    let status = resp.status();
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| status.as_u16().to_string())
}

/// Decode a response body as `T`, failing on non-2xx or schema mismatch.
pub(crate) async fn read_json<T: DeserializeOwned>(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<T, OmniApiError> {
    let status = resp.status();
    tracing::debug!(endpoint, status = status.as_u16(), "compliance service responded");

    if !status.is_success() {
        let status_text = status_text(&resp);
        let body = match resp.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(endpoint, error = %error_chain(&e), "error body unreadable");
                String::new()
            }
        };
        tracing::debug!(endpoint, status = status.as_u16(), %status_text, %body, "compliance service error body");
        return Err(OmniApiError::ApiError {
            endpoint: endpoint.into(),
            status: status.as_u16(),
            status_text,
            body,
        });
    }

    let bytes = resp.bytes().await.map_err(|e| OmniApiError::Http {
        endpoint: endpoint.into(),
        source: e,
    })?;

    serde_json::from_slice(&bytes).map_err(|e| OmniApiError::Deserialization {
        endpoint: endpoint.into(),
        source: e,
    })
}
