//! # Audit Workflow State Machine
//!
//! ```text
//!            submit                 response ok
//! Idle ─────────────▶ Loading ─────────────────▶ Success(result)
//!                      ▲   │                          │
//!                      │   │ non-2xx / transport /    │ submit
//!                      │   │ schema mismatch          │
//!                      │   ▼                          │
//!                      │ Failure(message) ◀───────────┘
//!                      │   │
//!                      └───┘ submit
//! ```
//!
//! The workflow is a single tagged value: there are no separate loading,
//! error, and result flags to drift apart. Entering `Loading` drops the
//! previous result or failure. `Loading` is not re-entrant.
//!
//! `Success` and `Failure` persist until a new submission supersedes them;
//! only [`AuditWorkflow::reset`] (session reinitialization) returns to
//! `Idle`.

use omni_core::{AuditQuery, AuditResult, ServiceError};
use serde::Serialize;
use thiserror::Error;

use crate::sequence::{RequestSeq, SequenceCounter, Settlement};

// ─── Failure ─────────────────────────────────────────────────────────

/// Category of a failed submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "status")]
pub enum FailureKind {
    /// No HTTP response: connectivity, timeout, body read.
    Transport,
    /// The service answered with a non-2xx status.
    Status(u16),
    /// A 2xx body that did not match the verdict shape.
    Schema,
}

/// A failed submission as shown to the user. Always recoverable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl From<ServiceError> for SubmitFailure {
    fn from(err: ServiceError) -> Self {
        let kind = match &err {
            ServiceError::Transport { .. } => FailureKind::Transport,
            ServiceError::Status { code, .. } => FailureKind::Status(*code),
            ServiceError::Schema { .. } => FailureKind::Schema,
        };
        Self {
            kind,
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for SubmitFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

// ─── State ───────────────────────────────────────────────────────────

/// The single current-workflow value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowState {
    /// Nothing submitted yet.
    Idle,
    /// A request is in flight.
    Loading { seq: RequestSeq },
    /// The most recent request produced a verdict.
    Success(AuditResult),
    /// The most recent request failed.
    Failure(SubmitFailure),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}

impl std::fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "IDLE"),
            Self::Loading { seq } => write!(f, "LOADING({seq})"),
            Self::Success(_) => write!(f, "SUCCESS"),
            Self::Failure(_) => write!(f, "FAILURE"),
        }
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors from workflow transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// A submission is already in flight; the new one is not started.
    #[error("an audit request is already in flight ({seq})")]
    InFlight { seq: RequestSeq },
}

// ─── Workflow ────────────────────────────────────────────────────────

/// Owner of the audit workflow state and its request sequence.
#[derive(Debug, Clone)]
pub struct AuditWorkflow {
    state: WorkflowState,
    seq: SequenceCounter,
}

impl Default for AuditWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditWorkflow {
    /// Create a workflow in the `Idle` state.
    pub fn new() -> Self {
        Self {
            state: WorkflowState::Idle,
            seq: SequenceCounter::default(),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// The verdict on display, if the last request succeeded.
    pub fn result(&self) -> Option<&AuditResult> {
        match &self.state {
            WorkflowState::Success(result) => Some(result),
            _ => None,
        }
    }

    /// The failure on display, if the last request failed.
    pub fn failure(&self) -> Option<&SubmitFailure> {
        match &self.state {
            WorkflowState::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    /// Whether a submit action with this query text would be accepted.
    pub fn can_submit(&self, query_text: &str) -> bool {
        !query_text.is_empty() && !self.is_loading()
    }

    /// The most recently issued request number.
    pub fn last_issued(&self) -> Option<RequestSeq> {
        self.seq.last_issued()
    }

    /// Enter `Loading` for `query` (IDLE | SUCCESS | FAILURE → LOADING).
    ///
    /// Clears any previous result or failure and returns the sequence number
    /// the response must be settled with. Rejected while already loading.
    pub fn begin(&mut self, query: &AuditQuery) -> Result<RequestSeq, WorkflowError> {
        if let WorkflowState::Loading { seq } = self.state {
            return Err(WorkflowError::InFlight { seq });
        }
        let seq = self.seq.next();
        tracing::debug!(%seq, scoped = query.policy_id().is_some(), "audit submission accepted");
        self.do_transition(WorkflowState::Loading { seq });
        Ok(seq)
    }

    /// Apply the outcome of request `seq` (LOADING → SUCCESS | FAILURE).
    ///
    /// Outcomes for any request other than the one currently awaited are
    /// discarded and leave the state untouched.
    pub fn settle(
        &mut self,
        seq: RequestSeq,
        outcome: Result<AuditResult, ServiceError>,
    ) -> Settlement {
        match self.state {
            WorkflowState::Loading { seq: awaited } if awaited == seq => {}
            _ => {
                tracing::warn!(%seq, state = %self.state, "discarding stale audit response");
                return Settlement::Stale;
            }
        }

        let next = match outcome {
            Ok(result) => WorkflowState::Success(result),
            Err(err) => WorkflowState::Failure(SubmitFailure::from(err)),
        };
        self.do_transition(next);
        Settlement::Applied
    }

    /// Return to `Idle`, abandoning any request in flight.
    ///
    /// The sequence counter is kept, so a late response to the abandoned
    /// request can never match a later one.
    pub fn reset(&mut self) -> Option<RequestSeq> {
        let abandoned = match self.state {
            WorkflowState::Loading { seq } => Some(seq),
            _ => None,
        };
        self.do_transition(WorkflowState::Idle);
        abandoned
    }

    fn do_transition(&mut self, to: WorkflowState) {
        tracing::info!(from = %self.state, to = %to, "audit workflow transition");
        self.state = to;
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
