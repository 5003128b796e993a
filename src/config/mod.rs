//! Configuration module for stackplan
//!
//! Lookup order:
//! 1. `--config PATH` (explicit, no fallback)
//! 2. Project config (`./stackplan.toml`)
//! 3. User config (`~/.config/stackplan/config.toml`)
//!
//! Environment variables (`STACKPLAN_*`, legacy `DEPLOYMENT_ENV`) are applied
//! on top of whichever file was loaded.

mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    apply_overrides, candidate_paths, discover, parse_with_warnings, ConfigFormat, LoadedConfig,
    PROJECT_CONFIG_FILE,
};
pub use types::{DeploymentConfig, DomainConfig, PipelineConfig};
