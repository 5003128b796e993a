//! Command handlers for the stackplan binary

pub mod resolve_domain;
pub mod synth;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use stackplan::config::{self, LoadedConfig};

/// Locate and load configuration relative to the working directory.
fn load_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let loaded = config::discover(explicit, &cwd).context("Failed to load configuration")?;
    Ok(loaded)
}
