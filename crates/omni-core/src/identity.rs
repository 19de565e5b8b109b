//! # Policy Identifier Newtype
//!
//! Policy ids are opaque, service-assigned strings. The only local rule is
//! that an id is never empty: `null` (global search) and `""` are distinct
//! at the service boundary and must not be conflated.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QueryError;

/// Opaque identifier of a policy document, assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct PolicyId(String);

impl PolicyId {
    /// Wrap a service-assigned id. Rejects the empty string.
    pub fn new(id: impl Into<String>) -> Result<Self, QueryError> {
        let id = id.into();
        if id.is_empty() {
            return Err(QueryError::EmptyPolicyId);
        }
        Ok(Self(id))
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for PolicyId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PolicyId::new(raw).map_err(serde::de::Error::custom)
    }
}

impl std::str::FromStr for PolicyId {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyId::new(s)
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_id_is_rejected() {
        assert!(matches!(PolicyId::new(""), Err(QueryError::EmptyPolicyId)));
        assert!("".parse::<PolicyId>().is_err());
    }

    #[test]
    fn id_serializes_as_bare_string() {
        let id = PolicyId::new("p1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"p1\"");
        assert_eq!(id.to_string(), "p1");
    }

    #[test]
    fn empty_id_fails_deserialization() {
        let result: Result<PolicyId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }
}
