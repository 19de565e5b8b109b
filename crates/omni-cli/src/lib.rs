//! # omni-cli -- Command-Line Client for the Compliance Service
//!
//! Provides the `omni` command-line interface.
//!
//! ## Subcommands
//!
//! - `omni policies`: List the policy catalog.
//! - `omni audit`: Run one audit and print the verdict panel.
//! - `omni shell`: Interactive audit session.
//!
//! ```bash
//! omni policies --json
//! omni audit --policy p1 Does this require annual testing?
//! omni --base-url http://compliance.internal:8000 shell
//! ```
//!
//! Every command takes its service through [`omni_core::ComplianceService`],
//! so the handlers run unchanged against the HTTP client or a scripted
//! service.

pub mod audit;
pub mod output;
pub mod policies;
pub mod shell;

#[cfg(test)]
pub(crate) mod testing;

use std::path::PathBuf;

use clap::Args;
use omni_client::{ConfigError, OmniApiConfig};

/// Connection flags shared by every subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ConnectionArgs {
    /// Path to a YAML configuration file (`base_url`, `timeout_secs`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Compliance service base address. Overrides the environment and the
    /// config file.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds. The transport default applies when unset.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl ConnectionArgs {
    /// Resolve the service configuration: flags over environment over config
    /// file over built-in defaults.
    pub fn resolve(&self) -> Result<OmniApiConfig, ConfigError> {
        let mut config = OmniApiConfig::load(self.config.as_deref())?;
        if let Some(raw) = &self.base_url {
            config = config.with_base_url(raw)?;
        }
        if let Some(secs) = self.timeout_secs {
            config = config.with_timeout_secs(secs)?;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_flag_wins() {
        let args = ConnectionArgs {
            base_url: Some("http://compliance.test:9000".into()),
            ..Default::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.base_url.as_str(), "http://compliance.test:9000/");
    }

    #[test]
    fn timeout_flag_is_applied() {
        let args = ConnectionArgs {
            base_url: Some("http://localhost:8000".into()),
            timeout_secs: Some(30),
            ..Default::default()
        };
        assert_eq!(args.resolve().unwrap().timeout_secs, Some(30));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let args = ConnectionArgs {
            timeout_secs: Some(0),
            ..Default::default()
        };
        assert!(matches!(args.resolve(), Err(ConfigError::InvalidTimeout(_))));
    }

    #[test]
    fn config_file_is_layered_under_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("omni.yaml");
        std::fs::write(&path, "base_url: http://from-file:8000\ntimeout_secs: 12\n").unwrap();

        let args = ConnectionArgs {
            config: Some(path),
            base_url: Some("http://from-flag:8000".into()),
            timeout_secs: Some(7),
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.base_url.as_str(), "http://from-flag:8000/");
        assert_eq!(config.timeout_secs, Some(7));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let args = ConnectionArgs {
            config: Some(PathBuf::from("/nonexistent/omni.yaml")),
            ..Default::default()
        };
        assert!(matches!(args.resolve(), Err(ConfigError::ReadFile { .. })));
    }
}
