//! # Audit Request and Verdict Types
//!
//! Wire types for `POST /audit`.
//!
//! ```text
//! request:  { "query": string, "policy_id": string | null }
//! response: { "status": "PASS" | "FAIL" | "AMBIGUOUS" | "INCONCLUSIVE",
//!             "confidence": "HIGH" | "MEDIUM" | "LOW",
//!             "reasoning": string,
//!             "citations": [string, ...],
//!             "intent": string }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::identity::PolicyId;

// ─── Request ─────────────────────────────────────────────────────────

/// A single audit submission. Constructed fresh per submit, never stored.
///
/// `policy_id` is always serialized: `None` becomes `null` (search all
/// policies). It is never omitted and never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditQuery {
    query: String,
    policy_id: Option<PolicyId>,
}

impl AuditQuery {
    /// Build a query. The text must be non-empty; it is sent verbatim.
    pub fn new(query: impl Into<String>, policy_id: Option<PolicyId>) -> Result<Self, QueryError> {
        let query = query.into();
        if query.is_empty() {
            return Err(QueryError::EmptyQuery);
        }
        Ok(Self { query, policy_id })
    }

    /// The free-text regulatory question.
    pub fn text(&self) -> &str {
        &self.query
    }

    /// The selected scope, `None` for a global search.
    pub fn policy_id(&self) -> Option<&PolicyId> {
        self.policy_id.as_ref()
    }
}

// ─── Verdict enumerations ────────────────────────────────────────────

/// Outcome of the audit for the stated obligation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerdictStatus {
    /// The obligation is satisfied.
    Pass,
    /// The obligation is violated.
    Fail,
    /// Evidence conflicts or is insufficient to decide.
    Ambiguous,
    /// The service could not reach any of the above.
    Inconclusive,
}

impl VerdictStatus {
    pub const ALL: [VerdictStatus; 4] = [
        Self::Pass,
        Self::Fail,
        Self::Ambiguous,
        Self::Inconclusive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Ambiguous => "AMBIGUOUS",
            Self::Inconclusive => "INCONCLUSIVE",
        }
    }
}

impl std::fmt::Display for VerdictStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory confidence in the status. Ordered `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub const ALL: [Confidence; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Intent ──────────────────────────────────────────────────────────

/// What kind of request the service detected. Classifies the input, not
/// the verdict.
///
/// Open enumeration: tags this client does not know are kept verbatim in
/// [`Intent::Other`] and serialize back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Intent {
    /// A regulatory compliance question.
    ComplianceAudit,
    /// A question about the system or institution itself.
    SystemMetadata,
    /// Unrelated to compliance; refused by the service.
    Reject,
    /// Any tag outside the known set.
    Other(String),
}

impl Intent {
    /// Tag the service uses when it did not classify the request.
    pub const UNKNOWN_TAG: &'static str = "UNKNOWN";

    pub fn as_str(&self) -> &str {
        match self {
            Self::ComplianceAudit => "COMPLIANCE_AUDIT",
            Self::SystemMetadata => "SYSTEM_METADATA",
            Self::Reject => "REJECT",
            Self::Other(tag) => tag,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl Default for Intent {
    fn default() -> Self {
        Self::Other(Self::UNKNOWN_TAG.to_string())
    }
}

impl From<String> for Intent {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "COMPLIANCE_AUDIT" => Self::ComplianceAudit,
            "SYSTEM_METADATA" => Self::SystemMetadata,
            "REJECT" => Self::Reject,
            _ => Self::Other(tag),
        }
    }
}

impl From<&str> for Intent {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        match intent {
            Intent::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Result ──────────────────────────────────────────────────────────

/// Structured verdict returned by `POST /audit`.
///
/// `intent` may be absent on the wire; the service's own default
/// (`"UNKNOWN"`) is applied in that case. Every other field is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditResult {
    pub status: VerdictStatus,
    pub confidence: Confidence,
    /// Free-text rationale. May be empty.
    pub reasoning: String,
    /// Evidence references in service relevance order. May be empty.
    pub citations: Vec<String>,
    #[serde(default)]
    pub intent: Intent,
}
