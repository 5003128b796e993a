//! Error types for stackplan
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::ProvisionError;

/// Result type alias for stackplan operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Main error type for plan construction
#[derive(Error, Debug)]
pub enum PlanError {
    /// Account id is not a 12-digit identifier
    #[error("invalid account id '{value}': expected 12 digits")]
    InvalidAccountId { value: String },

    /// Required descriptor field is missing or empty
    #[error("missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// Two options that cannot be combined were both set
    #[error("conflicting options in {context}: '{first}' and '{second}' are mutually exclusive")]
    ConflictingOptions {
        context: String,
        first: String,
        second: String,
    },

    /// Service sizing or port is unsatisfiable
    #[error("invalid service '{service}': {reason}")]
    InvalidService { service: String, reason: String },

    /// Same stage label appears twice in the stage registry
    #[error("duplicate stage '{label}' in stage registry")]
    DuplicateStage { label: String },

    /// Stage label cannot be embedded in zone names and construct ids
    #[error("invalid stage name '{label}': only letters, digits and '-' are allowed")]
    InvalidStageLabel { label: String },

    /// Name embedded in construct ids contains characters ids cannot carry
    #[error("invalid {field} '{value}': only letters, digits and '-' are allowed")]
    InvalidIdentifier { field: String, value: String },

    /// Two services resolve to the same child zone
    #[error("services '{first}' and '{second}' both resolve to zone '{zone_name}'")]
    ZoneCollision {
        zone_name: String,
        first: String,
        second: String,
    },

    /// Same repository name appears twice
    #[error("duplicate repository '{name}'")]
    DuplicateRepository { name: String },

    /// Same service name appears twice
    #[error("duplicate service '{name}'")]
    DuplicateService { name: String },

    /// Service refers to a repository that is not configured
    #[error("unknown repository '{name}' referenced by service '{service}'")]
    UnknownRepository { name: String, service: String },

    /// Stage would be composed without any service
    #[error("stage '{label}' has no services")]
    EmptyStage { label: String },

    /// Stage registry is empty
    #[error("no stages configured")]
    NoStages,

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// No configuration file was found in any lookup location
    #[error("no configuration file found (looked in: {searched})")]
    ConfigNotFound { searched: String },

    /// Configuration file extension is not recognised
    #[error("unsupported configuration format '{extension}' for {file}")]
    UnsupportedFormat { file: PathBuf, extension: String },

    /// Provider-reported failure, surfaced verbatim
    #[error("provisioning failed: {0}")]
    Provision(#[from] ProvisionError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlanError {
    /// True for errors detected before any provisioning call.
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            PlanError::Provision(_) | PlanError::Io(_) | PlanError::Json(_)
        )
    }
}
