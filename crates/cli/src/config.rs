//! Process configuration, read once from the environment at startup.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use github::{DEFAULT_API_URL, DEFAULT_RAW_URL, DEFAULT_TIMEOUT};
use pipeline::{BranchName, Credential, InvalidRepositoryId, RelaySettings, RepositoryId};
use thiserror::Error;

const DEFAULT_PORT: u16 = 9555;
const DEFAULT_TARGET_REPO: &str = "sematext/sematext-cloud";
const DEFAULT_DEPLOYMENT_REPO: &str = "sematext/deployment";

/// Invalid configuration. The process refuses to start.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT '{value}': expected an integer between 0 and 65535")]
    InvalidPort { value: String },

    #[error("invalid {variable}: {source}")]
    InvalidRepository {
        variable: &'static str,
        #[source]
        source: InvalidRepositoryId,
    },
}

/// Runtime settings for the relay.
///
/// Resolved from environment variables (empty values count as unset):
/// - `PORT`: HTTP listening port (default: 9555)
/// - `GITHUB_API_URL`: REST API base URL (default: `https://api.github.com`)
/// - `GITHUB_RAW_URL`: raw content host (default: `https://raw.githubusercontent.com`)
/// - `TARGET_REPO`: repository receiving dispatch events (default: `sematext/sematext-cloud`)
/// - `DEPLOYMENT_REPO`: repository holding `values.yaml` files (default: `sematext/deployment`)
/// - `DEPLOYMENT_BRANCH`: branch read from the deployment repository (default: `master`)
/// - `GITHUB_TOKEN`: default credential; when unset, each request must carry one
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub api_url: String,
    pub raw_url: String,
    pub target_repository: RepositoryId,
    pub deployment_repository: RepositoryId,
    pub deployment_branch: BranchName,
    pub default_credential: Option<Credential>,
    pub timeout: Duration,
}

impl ServiceConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the raw value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value
                .parse()
                .map_err(|_| ConfigError::InvalidPort { value })?,
            None => DEFAULT_PORT,
        };

        let repository = |variable: &'static str, default: &str| {
            let value = var(variable).unwrap_or_else(|| default.to_string());
            RepositoryId::parse(&value)
                .map_err(|source| ConfigError::InvalidRepository { variable, source })
        };

        Ok(Self {
            port,
            api_url: var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            raw_url: var("GITHUB_RAW_URL").unwrap_or_else(|| DEFAULT_RAW_URL.to_string()),
            target_repository: repository("TARGET_REPO", DEFAULT_TARGET_REPO)?,
            deployment_repository: repository("DEPLOYMENT_REPO", DEFAULT_DEPLOYMENT_REPO)?,
            deployment_branch: var("DEPLOYMENT_BRANCH")
                .and_then(BranchName::new)
                .unwrap_or_default(),
            default_credential: var("GITHUB_TOKEN").and_then(Credential::new),
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Address the listener binds: all interfaces on [`Self::port`].
    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// The subset of settings the orchestrator needs.
    pub fn relay_settings(&self) -> RelaySettings {
        RelaySettings {
            source_repository: self.deployment_repository.clone(),
            target_repository: self.target_repository.clone(),
            default_credential: self.default_credential.clone(),
        }
    }
}
