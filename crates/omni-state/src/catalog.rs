//! # Policy Catalog
//!
//! Holds the policy scopes fetched from `GET /policies`.
//!
//! ```text
//! Unloaded ──▶ Loading ──▶ Loaded(policies)
//!                 │
//!                 └──────▶ Failed(LoadError)
//! ```
//!
//! The catalog is loaded once per session. A failed load is terminal: the
//! policy set stays empty and scope selection is unavailable until the
//! session is reinitialized with [`PolicyCatalog::reset`]. On success the
//! whole set is installed at once; there are no partial updates.

use omni_core::{Policy, PolicyId, ServiceError};
use thiserror::Error;

use crate::sequence::{RequestSeq, SequenceCounter, Settlement};

/// The policy catalog could not be loaded. Fatal for the session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load policies: {cause}")]
pub struct LoadError {
    pub cause: ServiceError,
}

/// Errors from catalog transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog has already been requested this session.
    #[error("policy catalog already requested (state: {state})")]
    AlreadyRequested { state: String },
}

/// Lifecycle of the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogState {
    /// Not requested yet.
    Unloaded,
    /// `GET /policies` in flight.
    Loading { seq: RequestSeq },
    /// Catalog available, in service order.
    Loaded(Vec<Policy>),
    /// Load failed; no policies are available this session.
    Failed(LoadError),
}

impl std::fmt::Display for CatalogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unloaded => write!(f, "UNLOADED"),
            Self::Loading { .. } => write!(f, "LOADING"),
            Self::Loaded(_) => write!(f, "LOADED"),
            Self::Failed(_) => write!(f, "FAILED"),
        }
    }
}

/// Owner of the fetched policy set.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    state: CatalogState,
    seq: SequenceCounter,
}

impl Default for PolicyCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyCatalog {
    pub fn new() -> Self {
        Self {
            state: CatalogState::Unloaded,
            seq: SequenceCounter::default(),
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// Mark the catalog as loading and issue the sequence number the
    /// completion must carry.
    ///
    /// Only permitted from `Unloaded`: the catalog is fetched once per
    /// session and never retried.
    pub fn begin_load(&mut self) -> Result<RequestSeq, CatalogError> {
        if self.state != CatalogState::Unloaded {
            return Err(CatalogError::AlreadyRequested {
                state: self.state.to_string(),
            });
        }
        let seq = self.seq.next();
        self.state = CatalogState::Loading { seq };
        tracing::debug!(%seq, "policy catalog load started");
        Ok(seq)
    }

    /// Apply the outcome of the load issued as `seq`.
    pub fn finish_load(
        &mut self,
        seq: RequestSeq,
        outcome: Result<Vec<Policy>, ServiceError>,
    ) -> Settlement {
        match self.state {
            CatalogState::Loading { seq: awaited } if awaited == seq => {}
            _ => {
                tracing::warn!(%seq, state = %self.state, "discarding stale policy catalog response");
                return Settlement::Stale;
            }
        }

        self.state = match outcome {
            Ok(policies) => {
                tracing::info!(count = policies.len(), "policy catalog loaded");
                CatalogState::Loaded(policies)
            }
            Err(cause) => {
                let err = LoadError { cause };
                tracing::warn!(error = %err, "policy catalog unavailable for this session");
                CatalogState::Failed(err)
            }
        };
        Settlement::Applied
    }

    /// Return to `Unloaded`, abandoning any load in flight. Used when the
    /// session is reinitialized.
    pub fn reset(&mut self) {
        self.state = CatalogState::Unloaded;
    }

    /// The loaded policies, empty unless the catalog is `Loaded`.
    pub fn policies(&self) -> &[Policy] {
        match &self.state {
            CatalogState::Loaded(policies) => policies,
            _ => &[],
        }
    }

    pub fn find(&self, id: &PolicyId) -> Option<&Policy> {
        self.policies().iter().find(|p| &p.id == id)
    }

    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.state {
            CatalogState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Whether the scope selector has anything to offer.
    pub fn is_selectable(&self) -> bool {
        !self.policies().is_empty()
    }
}
