//! # Verdict Presenter
//!
//! Maps an [`AuditResult`] to a [`VerdictView`]: the status with its tone
//! and meaning, the confidence with its emphasis, the intent badge, the
//! reasoning, and the citations.
//!
//! ```text
//! status      PASS ─▶ Positive   FAIL ─▶ Negative
//!             AMBIGUOUS ─▶ Caution   INCONCLUSIVE ─▶ Neutral
//! confidence  HIGH ─▶ Strong   MEDIUM ─▶ Moderate   LOW ─▶ Weak
//! intent      COMPLIANCE_AUDIT ─▶ Audit   SYSTEM_METADATA ─▶ Metadata
//!             REJECT ─▶ Rejected   anything else ─▶ Neutral
//! ```
//!
//! [`present`] is total and side-effect free. Every field of the input shows
//! up in the output; citations keep their order.

use omni_core::{AuditResult, Confidence, Intent, VerdictStatus};
use serde::Serialize;

// ─── Status ──────────────────────────────────────────────────────────

/// Visual tone of a verdict status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Positive,
    Negative,
    Caution,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    pub status: VerdictStatus,
    pub tone: Tone,
    /// One-line reading of the status.
    pub meaning: &'static str,
}

fn classify_status(status: VerdictStatus) -> StatusView {
    let (tone, meaning) = match status {
        VerdictStatus::Pass => (Tone::Positive, "The obligation is satisfied."),
        VerdictStatus::Fail => (Tone::Negative, "The obligation is violated."),
        VerdictStatus::Ambiguous => (
            Tone::Caution,
            "The policy language is vague or the evidence conflicts.",
        ),
        VerdictStatus::Inconclusive => (
            Tone::Neutral,
            "No determination could be made from the available context.",
        ),
    };
    StatusView {
        status,
        tone,
        meaning,
    }
}

// ─── Confidence ──────────────────────────────────────────────────────

/// Display weight of a confidence level. Purely visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    Weak,
    Moderate,
    Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConfidenceView {
    pub level: Confidence,
    pub emphasis: Emphasis,
}

fn classify_confidence(level: Confidence) -> ConfidenceView {
    let emphasis = match level {
        Confidence::High => Emphasis::Strong,
        Confidence::Medium => Emphasis::Moderate,
        Confidence::Low => Emphasis::Weak,
    };
    ConfidenceView { level, emphasis }
}

// ─── Intent ──────────────────────────────────────────────────────────

/// Badge style for the detected intent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeKind {
    Audit,
    Metadata,
    Rejected,
    /// Fallback for intents this client does not recognize.
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntentBadge {
    pub kind: BadgeKind,
    /// The raw intent tag, shown as-is.
    pub label: String,
}

fn classify_intent(intent: &Intent) -> IntentBadge {
    let kind = match intent {
        Intent::ComplianceAudit => BadgeKind::Audit,
        Intent::SystemMetadata => BadgeKind::Metadata,
        Intent::Reject => BadgeKind::Rejected,
        Intent::Other(_) => BadgeKind::Neutral,
    };
    IntentBadge {
        kind,
        label: intent.as_str().to_string(),
    }
}

// ─── Citations ───────────────────────────────────────────────────────

/// The evidence trail. An empty list is its own state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum CitationsView {
    None,
    Listed(Vec<String>),
}

impl CitationsView {
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::Listed(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl From<&[String]> for CitationsView {
    fn from(citations: &[String]) -> Self {
        if citations.is_empty() {
            Self::None
        } else {
            Self::Listed(citations.to_vec())
        }
    }
}

// ─── View ────────────────────────────────────────────────────────────

/// Everything needed to render one verdict panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerdictView {
    pub status: StatusView,
    pub confidence: ConfidenceView,
    pub intent: IntentBadge,
    pub reasoning: String,
    pub citations: CitationsView,
}

/// Build the presentation of `result`.
pub fn present(result: &AuditResult) -> VerdictView {
    VerdictView {
        status: classify_status(result.status),
        confidence: classify_confidence(result.confidence),
        intent: classify_intent(&result.intent),
        reasoning: result.reasoning.clone(),
        citations: CitationsView::from(result.citations.as_slice()),
    }
}
