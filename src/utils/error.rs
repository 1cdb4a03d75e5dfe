use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("API request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("{procedure} failed: {status_line}")]
    ProcedureFailed {
        procedure: String,
        status_line: String,
    },

    #[error("Response parse error: {message}")]
    Parse { message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Transport,
    Procedure,
    Parse,
    Config,
}

impl ProbeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ProbeError::Transport(_) | ProbeError::HttpStatus { .. } => ErrorCategory::Transport,
            ProbeError::ProcedureFailed { .. } => ErrorCategory::Procedure,
            ProbeError::Parse { .. } | ProbeError::Serialization(_) => ErrorCategory::Parse,
            ProbeError::Io(_)
            | ProbeError::ConfigError { .. }
            | ProbeError::InvalidConfigValueError { .. } => ErrorCategory::Config,
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        ProbeError::Parse {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ProbeError>;
