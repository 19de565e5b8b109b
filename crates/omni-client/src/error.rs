//! Compliance service client error types.

use omni_core::ServiceError;

/// Errors from compliance service calls.
#[derive(Debug, thiserror::Error)]
pub enum OmniApiError {
    /// HTTP transport error: no response, or the body could not be read.
    #[error("HTTP error calling {endpoint}: {}", error_chain(.source))]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service returned a non-2xx status.
    #[error("compliance service {endpoint} returned {status} {status_text}")]
    ApiError {
        endpoint: String,
        status: u16,
        status_text: String,
        body: String,
    },
    /// A 2xx response body did not match the expected schema.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: serde_json::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl From<OmniApiError> for ServiceError {
    fn from(err: OmniApiError) -> Self {
        match err {
            OmniApiError::Http { source, .. } => ServiceError::Transport {
                message: error_chain(&source),
            },
            OmniApiError::ApiError {
                status,
                status_text,
                ..
            } => ServiceError::Status {
                code: status,
                status_text,
            },
            OmniApiError::Deserialization { endpoint, source } => ServiceError::Schema {
                endpoint,
                message: source.to_string(),
            },
            OmniApiError::Config(e) => ServiceError::Transport {
                message: e.to_string(),
            },
        }
    }
}

/// Render an error and its sources as `outer: inner: root`.
///
/// `reqwest` keeps the useful part ("connection refused", "operation timed
/// out") in the source chain rather than the top-level message.
pub(crate) fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("outer")]
    struct Outer(#[source] Inner);

    #[derive(Debug, thiserror::Error)]
    #[error("connection refused")]
    struct Inner;

    #[test]
    fn error_chain_includes_root_cause() {
        assert_eq!(error_chain(&Outer(Inner)), "outer: connection refused");
    }

    #[test]
    fn api_error_maps_to_status_failure() {
        let err = OmniApiError::ApiError {
            endpoint: "POST /audit".into(),
            status: 503,
            status_text: "Service Unavailable".into(),
            body: String::new(),
        };
        let service: ServiceError = err.into();
        assert_eq!(
            service,
            ServiceError::Status {
                code: 503,
                status_text: "Service Unavailable".into()
            }
        );
    }

    #[test]
    fn deserialization_maps_to_schema_failure() {
        let source = serde_json::from_str::<omni_core::AuditResult>("{}").unwrap_err();
        let err = OmniApiError::Deserialization {
            endpoint: "POST /audit".into(),
            source,
        };
        let service: ServiceError = err.into();
        assert!(service.is_schema());
    }
}
