pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::CliArgs;

pub use adapters::http::HttpApiClient;
pub use config::ProbeConfig;
pub use core::checker::ReadinessChecker;
pub use domain::model::{ProbeMode, ProcedureResponse, Readiness};
pub use utils::error::{ProbeError, Result};
