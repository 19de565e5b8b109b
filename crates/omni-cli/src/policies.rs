//! # Policies Subcommand
//!
//! `omni policies` loads the policy catalog once and lists it, one
//! `id  name` row per policy in service order.

use std::io::Write;

use anyhow::Result;
use clap::Args;

use omni_core::ComplianceService;
use omni_state::AuditSession;

use crate::output::print_out;

/// Arguments for the `omni policies` subcommand.
#[derive(Args, Debug, Default)]
pub struct PoliciesArgs {}

/// Execute `omni policies`. A catalog load failure is an error.
pub async fn run_policies<S: ComplianceService>(
    service: S,
    _args: &PoliciesArgs,
    json: bool,
    out: &mut impl Write,
) -> Result<u8> {
    let mut session = AuditSession::new(service);
    let policies = session.initialize().await?;

    if policies.is_empty() && !json {
        writeln!(out, "No policies available.")?;
        return Ok(0);
    }
    print_out(out, json, policies, |p| format!("{}  {}", p.id, p.name))?;
    Ok(0)
}
