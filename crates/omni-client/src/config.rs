//! Compliance service client configuration.
//!
//! The client talks to a single service base address. Resolution order,
//! lowest to highest precedence:
//!
//! 1. built-in default (`http://localhost:8000`, transport-default timeout)
//! 2. YAML config file (`base_url`, `timeout_secs`)
//! 3. environment (`OMNI_API_URL`, `OMNI_TIMEOUT_SECS`)
//! 4. explicit overrides applied by the caller (CLI flags)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use url::Url;

/// Default service address for a locally running compliance engine.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Environment variable overriding the service base address.
pub const ENV_BASE_URL: &str = "OMNI_API_URL";

/// Environment variable setting an explicit request timeout in seconds.
pub const ENV_TIMEOUT_SECS: &str = "OMNI_TIMEOUT_SECS";

/// Configuration for connecting to the compliance service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OmniApiConfig {
    /// Service base address. Always ends with `/` so endpoint paths join
    /// beneath it.
    pub base_url: Url,
    /// Request timeout in seconds. `None` leaves the transport default in
    /// place.
    pub timeout_secs: Option<u64>,
}

/// On-disk configuration file shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl OmniApiConfig {
    /// Build a configuration for the given base address.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("base_url", base_url)?,
            timeout_secs: None,
        })
    }

    /// The built-in default: [`DEFAULT_BASE_URL`] with the transport-default
    /// timeout.
    pub fn local_default() -> Result<Self, ConfigError> {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Load configuration from the defaults, an optional YAML file, and the
    /// process environment.
    pub fn load(file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::local_default()?;
        if let Some(path) = file {
            config = config.layer_file(&ConfigFile::read(path)?)?;
        }
        config.layer_env(|var| std::env::var(var).ok())
    }

    /// Load configuration from the defaults and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::local_default()?.layer_env(|var| std::env::var(var).ok())
    }

    /// Create a configuration pointing to a local mock server (for testing).
    pub fn local_mock(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url("localhost", &format!("http://127.0.0.1:{port}"))?,
            timeout_secs: Some(5),
        })
    }

    /// Replace the base address.
    pub fn with_base_url(mut self, raw: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url("--base-url", raw)?;
        Ok(self)
    }

    /// Set an explicit request timeout.
    pub fn with_timeout_secs(mut self, secs: u64) -> Result<Self, ConfigError> {
        if secs == 0 {
            return Err(ConfigError::InvalidTimeout("0".to_string()));
        }
        self.timeout_secs = Some(secs);
        Ok(self)
    }

    /// Resolve an endpoint path (e.g. `"policies"`) beneath the base address.
    pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
        self.base_url
            .join(path)
            .map_err(|e| ConfigError::InvalidUrl(path.to_string(), e.to_string()))
    }

    fn layer_file(mut self, file: &ConfigFile) -> Result<Self, ConfigError> {
        if let Some(raw) = &file.base_url {
            self.base_url = parse_base_url("base_url", raw)?;
        }
        if let Some(secs) = file.timeout_secs {
            self = self.with_timeout_secs(secs)?;
        }
        Ok(self)
    }

    fn layer_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = lookup(ENV_BASE_URL) {
            self.base_url = parse_base_url(ENV_BASE_URL, &raw)?;
        }
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            self = self.with_timeout_secs(secs)?;
        }
        Ok(self)
    }
}

impl ConfigFile {
    /// Read and parse a YAML configuration file.
    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::ParseFile {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn parse_base_url(origin: &str, raw: &str) -> Result<Url, ConfigError> {
    let mut url =
        Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(origin.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidUrl(
            origin.to_string(),
            format!("unsupported scheme `{}`", url.scheme()),
        ));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid timeout `{0}`: expected a positive number of seconds")]
    InvalidTimeout(String),
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file {}: {source}", path.display())]
    ParseFile {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}
