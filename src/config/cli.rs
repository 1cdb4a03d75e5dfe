use crate::config::toml_config::TomlConfig;
use crate::config::ProbeConfig;
use crate::domain::model::ProbeMode;
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// Command line surface. Unset flags fall back to the settings file, then to defaults.
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "k8s-readycheck")]
#[command(about = "Kubernetes readiness probe for a VoltDB node")]
pub struct CliArgs {
    #[arg(long, env = "READYCHECK_HOST", help = "Database host [default: localhost]")]
    pub host: Option<String>,

    #[arg(long, env = "READYCHECK_PORT", help = "HTTP API port [default: 8080]")]
    pub port: Option<u16>,

    #[arg(long, env = "READYCHECK_API_VERSION", help = "JSON API version [default: 2.0]")]
    pub api_version: Option<String>,

    #[arg(long, env = "READYCHECK_TIMEOUT_SECS", help = "Request timeout [default: 10]")]
    pub timeout_secs: Option<u64>,

    #[arg(long, value_enum, env = "READYCHECK_MODE", help = "Probe mode [default: partitions]")]
    pub mode: Option<ProbeMode>,

    #[arg(long, env = "READYCHECK_CONFIG", help = "TOML settings file")]
    pub config: Option<PathBuf>,

    #[arg(long, env = "READYCHECK_USER")]
    pub user: Option<String>,

    #[arg(long, env = "READYCHECK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

impl CliArgs {
    pub fn into_config(self) -> Result<ProbeConfig> {
        let mut config = ProbeConfig::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading settings file: {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut config);
        }

        if let Some(host) = self.host {
            config.host = host;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(api_version) = self.api_version {
            config.api_version = api_version;
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if self.user.is_some() {
            config.user = self.user;
        }
        if self.password.is_some() {
            config.password = self.password;
        }

        Ok(config)
    }
}
