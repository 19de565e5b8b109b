//! # Audit Session
//!
//! One client session: a policy catalog loaded once, a scope selection, the
//! query text, and the audit workflow, driven against a
//! [`ComplianceService`].
//!
//! Two ways to drive it:
//!
//! - **Awaitable**: [`AuditSession::initialize`] and [`AuditSession::submit`]
//!   perform the network call inline. `&mut self` across the await rules out
//!   overlapping submissions at compile time.
//! - **Split**: `begin_*` issues a sequence number and the request to send;
//!   the caller performs the call wherever it likes and hands the outcome
//!   back through `finish_load` / `settle_submit`. Late outcomes for
//!   superseded requests come back as [`Settlement::Stale`].
//!
//! The query text is never cleared by a failure, so the user can resubmit
//! immediately.

use omni_core::{AuditQuery, AuditResult, ComplianceService, Policy, QueryError, ServiceError};
use thiserror::Error;

use crate::catalog::{CatalogError, CatalogState, LoadError, PolicyCatalog};
use crate::scope::{Scope, ScopeError};
use crate::sequence::{RequestSeq, Settlement};
use crate::workflow::{AuditWorkflow, WorkflowError, WorkflowState};

/// Errors returned by session operations. None of them change the workflow
/// state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error(transparent)]
    Scope(#[from] ScopeError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// A submission that has entered `Loading` and must now be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAudit {
    pub seq: RequestSeq,
    pub query: AuditQuery,
}

/// Client session state plus the service it talks to.
#[derive(Debug)]
pub struct AuditSession<S> {
    service: S,
    catalog: PolicyCatalog,
    workflow: AuditWorkflow,
    scope: Scope,
    query_text: String,
}

impl<S> AuditSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            catalog: PolicyCatalog::new(),
            workflow: AuditWorkflow::new(),
            scope: Scope::Global,
            query_text: String::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn catalog(&self) -> &PolicyCatalog {
        &self.catalog
    }

    pub fn workflow(&self) -> &AuditWorkflow {
        &self.workflow
    }

    pub fn state(&self) -> &WorkflowState {
        self.workflow.state()
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn query_text(&self) -> &str {
        &self.query_text
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query_text = text.into();
    }

    /// Whether the submit action is currently enabled.
    pub fn can_submit(&self) -> bool {
        self.workflow.can_submit(&self.query_text)
    }

    /// Select the audit scope.
    ///
    /// `Scope::Global` is always accepted. A policy scope must name a policy
    /// in the loaded catalog.
    pub fn select_scope(&mut self, scope: Scope) -> Result<(), SessionError> {
        if let Scope::Policy(id) = &scope {
            if self.catalog.find(id).is_none() {
                let err = match self.catalog.state() {
                    CatalogState::Loaded(_) => ScopeError::UnknownPolicy { id: id.clone() },
                    CatalogState::Failed(err) => ScopeError::Unavailable {
                        reason: err.to_string(),
                    },
                    CatalogState::Unloaded | CatalogState::Loading { .. } => {
                        ScopeError::Unavailable {
                            reason: "policy catalog not loaded yet".to_string(),
                        }
                    }
                };
                return Err(err.into());
            }
        }
        tracing::debug!(scope = ?scope.policy_id(), "audit scope selected");
        self.scope = scope;
        Ok(())
    }

    /// Start the one catalog load of this session.
    pub fn begin_load(&mut self) -> Result<RequestSeq, SessionError> {
        Ok(self.catalog.begin_load()?)
    }

    /// Apply the outcome of a catalog load.
    pub fn finish_load(
        &mut self,
        seq: RequestSeq,
        outcome: Result<Vec<Policy>, ServiceError>,
    ) -> Settlement {
        self.catalog.finish_load(seq, outcome)
    }

    /// Validate the current input and enter `Loading`.
    ///
    /// Rejected while a request is in flight or when the query text is
    /// empty; in both cases nothing changes.
    pub fn begin_submit(&mut self) -> Result<PendingAudit, SessionError> {
        if let WorkflowState::Loading { seq } = self.workflow.state() {
            return Err(WorkflowError::InFlight { seq: *seq }.into());
        }
        let query = AuditQuery::new(self.query_text.clone(), self.scope.policy_id().cloned())?;
        let seq = self.workflow.begin(&query)?;
        Ok(PendingAudit { seq, query })
    }

    /// Apply the outcome of submission `seq`.
    pub fn settle_submit(
        &mut self,
        seq: RequestSeq,
        outcome: Result<AuditResult, ServiceError>,
    ) -> Settlement {
        self.workflow.settle(seq, outcome)
    }

    /// Start over as a fresh session: catalog unloaded, workflow idle, scope
    /// global. Anything in flight becomes stale. The query text is kept.
    pub fn reinitialize(&mut self) {
        let abandoned = self.workflow.reset();
        self.catalog.reset();
        self.scope = Scope::Global;
        tracing::info!(abandoned = ?abandoned.map(|s| s.get()), "audit session reinitialized");
    }
}

impl<S: ComplianceService> AuditSession<S> {
    /// Load the policy catalog. Call once, at session start.
    ///
    /// A load failure is recorded in the catalog and returned; the session
    /// stays usable for global-scope audits.
    pub async fn initialize(&mut self) -> Result<&[Policy], SessionError> {
        let seq = self.begin_load()?;
        let outcome = self.service.list_policies().await;
        self.finish_load(seq, outcome);

        if let Some(err) = self.catalog.load_error() {
            return Err(err.clone().into());
        }
        Ok(self.catalog.policies())
    }

    /// Submit the current query against the current scope and wait for the
    /// outcome.
    ///
    /// Returns the resulting workflow state. A failed audit is a `Failure`
    /// state, not an `Err`; `Err` means the submission was not started.
    pub async fn submit(&mut self) -> Result<&WorkflowState, SessionError> {
        let pending = self.begin_submit()?;
        let outcome = self.service.run_audit(&pending.query).await;
        self.settle_submit(pending.seq, outcome);
        Ok(self.workflow.state())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
