use crate::config::ProbeConfig;
use crate::domain::model::ProbeMode;
use crate::utils::error::{ProbeError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional probe settings file. Every key may be omitted.
///
/// ```toml
/// [target]
/// host = "voltdb-0.voltdb"
/// port = 8080
/// user = "${VOLTDB_USER}"
/// password = "${VOLTDB_PASSWORD}"
///
/// [probe]
/// mode = "replication"
/// timeout_secs = 5
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub probe: ProbeSettings,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub api_version: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProbeSettings {
    pub mode: Option<ProbeMode>,
    pub timeout_secs: Option<u64>,
}

impl TomlConfig {
    /// Loads a settings file from disk.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProbeError::Io)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProbeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProbeError::ConfigError {
            message: format!("env substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Overlays the keys present in the file onto `config`.
    pub fn apply_to(&self, config: &mut ProbeConfig) {
        if let Some(host) = &self.target.host {
            config.host = host.clone();
        }
        if let Some(port) = self.target.port {
            config.port = port;
        }
        if let Some(api_version) = &self.target.api_version {
            config.api_version = api_version.clone();
        }
        if let Some(user) = &self.target.user {
            config.user = Some(user.clone());
        }
        if let Some(password) = &self.target.password {
            config.password = Some(password.clone());
        }
        if let Some(mode) = self.probe.mode {
            config.mode = mode;
        }
        if let Some(timeout_secs) = self.probe.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
    }
}
