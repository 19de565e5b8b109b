//! Request sequence numbers and completion outcomes.

use serde::{Deserialize, Serialize};

/// Sequence number attached to a network call when it is issued.
///
/// Issued by [`SequenceCounter`] in strictly increasing order; never reused
/// within a session, including across reinitialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestSeq(u64);

impl RequestSeq {
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RequestSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What happened to a completion handed back to a state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    /// The completion was the one awaited and has been applied.
    Applied,
    /// The completion belongs to a superseded request and was discarded.
    Stale,
}

impl Settlement {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// Monotonic issuer of [`RequestSeq`] values.
#[derive(Debug, Clone, Default)]
pub(crate) struct SequenceCounter {
    last: u64,
}

impl SequenceCounter {
    pub(crate) fn next(&mut self) -> RequestSeq {
        self.last += 1;
        RequestSeq(self.last)
    }

    pub(crate) fn last_issued(&self) -> Option<RequestSeq> {
        (self.last > 0).then_some(RequestSeq(self.last))
    }
}
