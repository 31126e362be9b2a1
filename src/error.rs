//! Error types for the IPL statistics CLI

use std::path::PathBuf;
use thiserror::Error;


pub type Result<T> = std::result::Result<T, IplError>;

/// Broad failure classes reported to callers alongside the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    DataValidation,
    UpstreamUnavailable,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::DataValidation => "data_validation",
            ErrorKind::UpstreamUnavailable => "upstream_unavailable",
            ErrorKind::Internal => "internal",
        }
    }
}

#[derive(Error, Debug)]
pub enum IplError {
    #[error("Team '{name}' not found")]
    TeamNotFound {
        name: String,
        available: Vec<String>,
    },

    #[error("Cached file not found: {}", path.display())]
    MissingCache { path: PathBuf },

    #[error("Team with ID {id} not found")]
    UnknownFranchise { id: String },

    #[error("{table} is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("Season cannot be inferred for {table}: {reason}")]
    SeasonInference { table: String, reason: String },

    #[error("Invalid data in {source_name}: {message}")]
    DataValidation {
        source_name: String,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Stats feed URL not configured; set {env_var}")]
    FeedNotConfigured { env_var: String },

    #[error("Upstream source unavailable: {message}")]
    Upstream { message: String },

    #[error("Prediction model unavailable: {message}")]
    Model { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse season: {0}")]
    InvalidSeason(#[from] std::num::ParseIntError),

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl IplError {
    /// Shorthand for a data-validation failure attributed to `source_name`.
    pub fn validation(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        IplError::DataValidation {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            IplError::TeamNotFound { .. }
            | IplError::MissingCache { .. }
            | IplError::UnknownFranchise { .. } => ErrorKind::NotFound,
            IplError::MissingColumn { .. }
            | IplError::SeasonInference { .. }
            | IplError::DataValidation { .. }
            | IplError::Csv(_) => ErrorKind::DataValidation,
            IplError::Http(_)
            | IplError::FeedNotConfigured { .. }
            | IplError::Upstream { .. }
            | IplError::Model { .. } => ErrorKind::UpstreamUnavailable,
            IplError::Io(_)
            | IplError::Json(_)
            | IplError::InvalidSeason(_)
            | IplError::InvalidArgument { .. } => ErrorKind::Internal,
        }
    }

    /// JSON error object printed by the CLI in `--json` mode.
    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "kind": self.kind().as_str(),
        });
        if let IplError::TeamNotFound { available, .. } = self {
            body["available_teams"] = serde_json::json!(available);
        }
        body
    }
}
