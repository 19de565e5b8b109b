//! Policy scope as listed by `GET /policies`.

use serde::{Deserialize, Serialize};

use crate::identity::PolicyId;

/// A selectable policy scope. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Opaque, unique, service-assigned identifier.
    pub id: PolicyId,
    /// Human-readable name shown in the scope selector.
    pub name: String,
}

impl Policy {
    pub fn new(id: PolicyId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
