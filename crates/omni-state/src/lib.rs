//! # omni-state -- Client Workflow State for OmniCompliance
//!
//! Owns every piece of mutable client state: the policy catalog, the
//! selected scope, the query text, and the audit workflow.
//!
//! ## State Machines
//!
//! - **Policy catalog** (`catalog`): `Unloaded → Loading → Loaded | Failed`.
//!   Loaded once per session; a failure is terminal until the session is
//!   reinitialized.
//! - **Audit workflow** (`workflow`): `Idle → Loading → Success | Failure`,
//!   and `Success | Failure → Loading` on resubmission. Never back to `Idle`
//!   except by reinitializing the session.
//!
//! ## Request Sequencing
//!
//! Every network call is issued against a monotonically increasing
//! [`RequestSeq`]. A completion is applied only if its sequence number is
//! still the one the state machine is waiting for; anything else is a
//! [`Settlement::Stale`] and is dropped. Calls are never cancelled, so this
//! check is what keeps a late response from overwriting newer state.
//!
//! ## Session
//!
//! [`AuditSession`] ties the state machines to a
//! [`omni_core::ComplianceService`]. It offers both awaitable operations
//! (`initialize`, `submit`) and a split begin/settle API for event-loop
//! drivers that receive completions as messages.

pub mod catalog;
pub mod scope;
pub mod sequence;
pub mod session;
pub mod workflow;

pub use catalog::{CatalogError, CatalogState, LoadError, PolicyCatalog};
pub use scope::{Scope, ScopeError};
pub use sequence::{RequestSeq, Settlement};
pub use session::{AuditSession, PendingAudit, SessionError};
pub use workflow::{AuditWorkflow, FailureKind, SubmitFailure, WorkflowError, WorkflowState};
