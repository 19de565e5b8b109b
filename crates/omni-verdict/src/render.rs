//! Plain-text rendering of a [`VerdictView`] for terminals.

use std::fmt;

use crate::presenter::{BadgeKind, CitationsView, Emphasis, Tone, VerdictView};

/// Shown in place of the evidence trail when no citations came back.
pub const NO_CITATIONS: &str = "No specific citations were referenced in the final decision.";

/// Shown under the reasoning header when the service gave no rationale.
pub const NO_REASONING: &str = "No reasoning was provided with this verdict.";

/// Shown in the result area before any verdict exists.
pub const IDLE_PLACEHOLDER: &str = "Select a policy scope to begin audit.";

/// Shown while an audit request is in flight.
pub const LOADING_INDICATOR: &str = "Processing...";

fn tone_marker(tone: Tone) -> &'static str {
    match tone {
        Tone::Positive => "[ok]",
        Tone::Negative => "[x]",
        Tone::Caution => "[!]",
        Tone::Neutral => "[?]",
    }
}

fn emphasis_meter(emphasis: Emphasis) -> &'static str {
    match emphasis {
        Emphasis::Strong => "###",
        Emphasis::Moderate => "##-",
        Emphasis::Weak => "#--",
    }
}

fn badge(kind: BadgeKind, label: &str) -> String {
    match kind {
        BadgeKind::Neutral => format!("({label})"),
        _ => format!("[{label}]"),
    }
}

impl fmt::Display for VerdictView {
    /// ```text
    /// [ok] PASS  [COMPLIANCE_AUDIT]  Compliance Assessment
    ///      The obligation is satisfied.
    ///      Confidence: HIGH ###
    ///
    /// ANALYSIS & REASONING
    ///   Section 4 mandates yearly review.
    ///
    /// EVIDENCE TRAIL
    ///   1. HR-4.2
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {}  {}  Compliance Assessment",
            tone_marker(self.status.tone),
            self.status.status,
            badge(self.intent.kind, &self.intent.label),
        )?;
        writeln!(f, "     {}", self.status.meaning)?;
        writeln!(
            f,
            "     Confidence: {} {}",
            self.confidence.level,
            emphasis_meter(self.confidence.emphasis),
        )?;

        writeln!(f)?;
        writeln!(f, "ANALYSIS & REASONING")?;
        if self.reasoning.trim().is_empty() {
            writeln!(f, "  {NO_REASONING}")?;
        } else {
            for line in self.reasoning.lines() {
                writeln!(f, "  {line}")?;
            }
        }

        writeln!(f)?;
        writeln!(f, "EVIDENCE TRAIL")?;
        match &self.citations {
            CitationsView::None => write!(f, "  {NO_CITATIONS}"),
            CitationsView::Listed(items) => {
                for (idx, cite) in items.iter().enumerate() {
                    if idx > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {}. {cite}", idx + 1)?;
                }
                Ok(())
            }
        }
    }
}
