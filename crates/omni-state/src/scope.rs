//! Audit scope selection.

use omni_core::PolicyId;
use thiserror::Error;

/// Which policies an audit searches.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Scope {
    /// Search the entire knowledge base. Sent as `policy_id: null`.
    #[default]
    Global,
    /// Restrict the audit to one loaded policy.
    Policy(PolicyId),
}

impl Scope {
    /// The wire value of `policy_id`.
    pub fn policy_id(&self) -> Option<&PolicyId> {
        match self {
            Self::Global => None,
            Self::Policy(id) => Some(id),
        }
    }

    /// One-line hint describing what the scope searches.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Global => "Searching entire knowledge base.",
            Self::Policy(_) => "Scoped to specific document.",
        }
    }
}

impl From<Option<PolicyId>> for Scope {
    fn from(id: Option<PolicyId>) -> Self {
        id.map_or(Self::Global, Self::Policy)
    }
}

/// A scope selection that the loaded catalog cannot satisfy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScopeError {
    /// No catalog is loaded, so only the global scope is available.
    #[error("policy scopes are unavailable ({reason}); only global search is possible")]
    Unavailable { reason: String },

    /// The id is not in the loaded catalog.
    #[error("unknown policy `{id}`")]
    UnknownPolicy { id: PolicyId },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_scope_has_no_policy_id() {
        assert_eq!(Scope::Global.policy_id(), None);
        assert_eq!(Scope::default(), Scope::Global);
        assert_eq!(Scope::Global.description(), "Searching entire knowledge base.");
    }

    #[test]
    fn policy_scope_exposes_id() {
        let id = PolicyId::new("p1").unwrap();
        let scope = Scope::from(Some(id.clone()));
        assert_eq!(scope.policy_id(), Some(&id));
        assert_eq!(scope.description(), "Scoped to specific document.");
    }
}
