//! # Audit Subcommand
//!
//! `omni audit [--policy ID] QUERY...` runs one audit in a fresh session:
//!
//! 1. load the policy catalog (a failure is reported and the audit continues
//!    against the global scope),
//! 2. select the scope, checked against the catalog when `--policy` is given,
//! 3. submit the query and render the verdict panel.
//!
//! Exit code 0 on a verdict, including `REJECT` verdicts; 1 on any failure.

use std::io::Write;

use anyhow::{bail, Result};
use clap::Args;

use omni_core::{ComplianceService, PolicyId};
use omni_state::{AuditSession, Scope, WorkflowState};
use omni_verdict::present;

use crate::output::print_one_with_warnings;

/// Arguments for the `omni audit` subcommand.
#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Restrict the audit to one policy from the catalog. Searches the entire
    /// knowledge base when omitted.
    #[arg(long)]
    pub policy: Option<String>,

    /// The compliance question. Multiple words are joined with single spaces.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Execute `omni audit`.
pub async fn run_audit<S: ComplianceService>(
    service: S,
    args: &AuditArgs,
    json: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let mut session = AuditSession::new(service);

    let mut warnings = Vec::new();
    if let Err(err) = session.initialize().await {
        if args.policy.is_some() {
            return Err(err.into());
        }
        warnings.push(err.to_string());
    }

    if let Some(raw) = &args.policy {
        session.select_scope(Scope::Policy(PolicyId::new(raw.as_str())?))?;
    }
    tracing::debug!(scope = session.scope().description(), "submitting audit");

    session.set_query(args.query.join(" "));
    match session.submit().await? {
        WorkflowState::Success(result) => {
            print_one_with_warnings(out, json, result, &warnings, |r| present(r).to_string())?;
            Ok(0)
        }
        WorkflowState::Failure(failure) => bail!("{failure}"),
        state => bail!("audit did not settle (state: {state})"),
    }
}
