//! # omni-core -- Foundational Types for the OmniCompliance Client
//!
//! Defines the value types exchanged with the compliance-assessment service
//! and the trait seam through which the rest of the workspace talks to it.
//! Every other crate in the workspace depends on `omni-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype identifiers.** `PolicyId` cannot be constructed empty, so an
//!    empty-string scope can never reach the wire. The unscoped (global)
//!    search is `None`, serialized as `null`.
//!
//! 2. **Closed verdict enums.** `VerdictStatus` and `Confidence` reject values
//!    outside the service contract at deserialization time.
//!
//! 3. **Open intent enum.** `Intent` keeps the raw tag for values this client
//!    does not know, so new service-side intents never fail a response.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `omni-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod audit;
pub mod error;
pub mod identity;
pub mod policy;
pub mod service;

pub use audit::{AuditQuery, AuditResult, Confidence, Intent, VerdictStatus};
pub use error::{QueryError, ServiceError};
pub use identity::PolicyId;
pub use policy::Policy;
pub use service::ComplianceService;
