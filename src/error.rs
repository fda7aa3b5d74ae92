//! Error types for release-steward.

use thiserror::Error;

use crate::reconcile::Stage;

/// Main error type for release-steward operations.
#[derive(Error, Debug)]
pub enum StewardError {
    // Input / environment errors, raised before any remote call
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Any failed hosting-platform call
    #[error("Forge operation failed: {0}")]
    ForgeError(String),

    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<StewardError>,
    },

    #[error("unknown error type {0}")]
    Unknown(String),

    #[error("Git URL parse error: {0}")]
    GitUrlError(#[from] git_url_parse::GitUrlParseError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] log::SetLoggerError),
}

/// Result type alias using StewardError
pub type Result<T> = std::result::Result<T, StewardError>;

impl StewardError {
    /// Create a forge error with context
    pub fn forge(msg: impl Into<String>) -> Self {
        Self::ForgeError(msg.into())
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Attribute this error to the reconciliation stage that raised it.
    pub fn in_stage(self, stage: Stage) -> Self {
        Self::StageFailed {
            stage,
            source: Box::new(self),
        }
    }

    /// The stage that failed, if the error has been attributed to one.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Self::StageFailed { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

// Every octocrab failure is a remote operation error: network, auth,
// not-found and conflict are not distinguished and never retried.
impl From<octocrab::Error> for StewardError {
    fn from(err: octocrab::Error) -> Self {
        match &err {
            octocrab::Error::GitHub { source, .. } => Self::ForgeError(format!(
                "GitHub API error ({}): {}",
                source.status_code, source.message
            )),
            _ => Self::ForgeError(format!("GitHub API error: {}", err)),
        }
    }
}

impl From<color_eyre::Report> for StewardError {
    fn from(report: color_eyre::Report) -> Self {
        Self::Unknown(report.to_string())
    }
}

// A panicked or cancelled task carries no taxonomy error.
impl From<tokio::task::JoinError> for StewardError {
    fn from(err: tokio::task::JoinError) -> Self {
        if !err.is_panic() {
            return Self::Unknown(err.to_string());
        }

        let payload = err.into_panic();

        if let Some(msg) = payload.downcast_ref::<&str>() {
            Self::Unknown(msg.to_string())
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            Self::Unknown(msg.clone())
        } else {
            Self::Unknown("panic with non-string payload".to_string())
        }
    }
}
