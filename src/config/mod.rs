#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::ProbeMode;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_API_VERSION: &str = "2.0";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Everything the checker needs for one invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub host: String,
    pub port: u16,
    pub api_version: String,
    pub timeout_secs: u64,
    pub mode: ProbeMode,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            mode: ProbeMode::default(),
            user: None,
            password: None,
        }
    }
}

impl ProbeConfig {
    /// `http://<host>:<port>/api/<version>/`, with IPv6 literals bracketed.
    pub fn api_url(&self) -> String {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };
        format!(
            "http://{}:{}/api/{}/",
            host,
            self.port,
            self.api_version.trim_matches('/')
        )
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Validate for ProbeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("host", &self.host)?;
        validation::validate_range("port", self.port, 1, u16::MAX)?;
        validation::validate_non_empty_string("api_version", &self.api_version)?;
        validation::validate_range("timeout_secs", self.timeout_secs, 1, MAX_TIMEOUT_SECS)?;
        validation::validate_url("api_url", &self.api_url())?;
        validation::validate_paired("user", &self.user, "password", &self.password)?;
        Ok(())
    }
}
