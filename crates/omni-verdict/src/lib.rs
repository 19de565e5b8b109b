//! # omni-verdict -- Verdict Presentation
//!
//! Turns an [`omni_core::AuditResult`] into what the user sees. The
//! [`present`] classifier is a pure function; [`render`] formats its output
//! as a plain-text panel.
//!
//! Nothing here talks to the network or holds state, and nothing here can
//! fail: every status × confidence × intent combination has a presentation,
//! including intents this client has never seen.

pub mod presenter;
pub mod render;

pub use presenter::{
    present, BadgeKind, CitationsView, ConfidenceView, Emphasis, IntentBadge, StatusView, Tone,
    VerdictView,
};
pub use render::{IDLE_PLACEHOLDER, LOADING_INDICATOR, NO_CITATIONS, NO_REASONING};
