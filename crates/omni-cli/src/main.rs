//! # omni CLI entry point
//!
//! Parses command-line arguments, installs logging, resolves the service
//! configuration and dispatches to subcommand handlers on a current-thread
//! Tokio runtime.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::task::LocalSet;
use tracing_subscriber::EnvFilter;

use omni_cli::audit::{run_audit, AuditArgs};
use omni_cli::policies::{run_policies, PoliciesArgs};
use omni_cli::shell::{run_shell, ShellArgs};
use omni_cli::ConnectionArgs;
use omni_client::OmniClient;

/// OmniCompliance audit client.
///
/// Asks the compliance-assessment service whether a question about policy
/// obligations passes, fails, or cannot be decided, and shows the reasoning
/// and citations behind the verdict.
#[derive(Parser, Debug)]
#[command(name = "omni", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    log_json: bool,

    /// Print results as JSON (`{"ok": true, "data": ...}`).
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the policies available as audit scopes.
    Policies(PoliciesArgs),

    /// Run one audit and print the verdict.
    Audit(AuditArgs),

    /// Interactive audit session.
    Shell(ShellArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    let logs = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        logs.json().init();
    } else {
        logs.init();
    }

    tracing::debug!("omni CLI v{} starting", env!("CARGO_PKG_VERSION"));

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> Result<u8> {
    let config = cli
        .connection
        .resolve()
        .context("invalid service configuration")?;
    tracing::debug!(base_url = %config.base_url, "resolved service configuration");
    let client = OmniClient::new(&config)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let mut stdout = std::io::stdout();
    match cli.command {
        Commands::Policies(args) => {
            runtime.block_on(run_policies(client, &args, cli.json, &mut stdout))
        }
        Commands::Audit(args) => runtime.block_on(run_audit(client, &args, cli.json, &mut stdout)),
        Commands::Shell(_) => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            LocalSet::new().block_on(&runtime, run_shell(client, input, &mut stdout))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn cli_parse_policies() {
        let cli = Cli::try_parse_from(["omni", "policies"]).unwrap();
        assert!(matches!(cli.command, Commands::Policies(_)));
        assert!(!cli.json);
    }

    #[test]
    fn cli_parse_audit_joins_words() {
        let cli = Cli::try_parse_from([
            "omni",
            "audit",
            "--policy",
            "p1",
            "Does",
            "this",
            "require",
            "annual",
            "testing?",
        ])
        .unwrap();
        if let Commands::Audit(args) = cli.command {
            assert_eq!(args.policy.as_deref(), Some("p1"));
            assert_eq!(args.query.join(" "), "Does this require annual testing?");
        } else {
            panic!("expected audit subcommand");
        }
    }

    #[test]
    fn cli_parse_audit_without_policy_is_global() {
        let cli = Cli::try_parse_from(["omni", "audit", "Is MFA required?"]).unwrap();
        if let Commands::Audit(args) = cli.command {
            assert!(args.policy.is_none());
            assert_eq!(args.query, vec!["Is MFA required?".to_string()]);
        }
    }

    #[test]
    fn cli_parse_audit_requires_query() {
        assert!(Cli::try_parse_from(["omni", "audit"]).is_err());
        assert!(Cli::try_parse_from(["omni", "audit", "--policy", "p1"]).is_err());
    }

    #[test]
    fn cli_parse_shell() {
        let cli = Cli::try_parse_from(["omni", "shell"]).unwrap();
        assert!(matches!(cli.command, Commands::Shell(_)));
    }

    #[test]
    fn cli_parse_verbose_levels() {
        let cli0 = Cli::try_parse_from(["omni", "policies"]).unwrap();
        assert_eq!(cli0.verbose, 0);

        let cli2 = Cli::try_parse_from(["omni", "-vv", "policies"]).unwrap();
        assert_eq!(cli2.verbose, 2);

        let cli3 = Cli::try_parse_from(["omni", "policies", "-vvv"]).unwrap();
        assert_eq!(cli3.verbose, 3);
    }

    #[test]
    fn cli_parse_global_connection_flags() {
        let cli = Cli::try_parse_from([
            "omni",
            "audit",
            "q",
            "--base-url",
            "http://compliance.test:9000",
            "--timeout-secs",
            "20",
            "--config",
            "omni.yaml",
            "--json",
            "--log-json",
        ])
        .unwrap();
        assert_eq!(
            cli.connection.base_url.as_deref(),
            Some("http://compliance.test:9000")
        );
        assert_eq!(cli.connection.timeout_secs, Some(20));
        assert_eq!(cli.connection.config, Some(PathBuf::from("omni.yaml")));
        assert!(cli.json);
        assert!(cli.log_json);
    }

    #[test]
    fn cli_parse_no_subcommand_errors() {
        assert!(Cli::try_parse_from(["omni"]).is_err());
    }

    #[test]
    fn cli_parse_invalid_subcommand_errors() {
        assert!(Cli::try_parse_from(["omni", "nonexistent"]).is_err());
    }
}
