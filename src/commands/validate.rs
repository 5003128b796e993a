use std::path::Path;

use anyhow::{Context, Result};
use stackplan::application::ValidateUseCase;
use stackplan::presentation::output;

use super::load_config;

pub fn cmd_validate(config: Option<&Path>, json: bool) -> Result<()> {
    let loaded = load_config(config)?;
    let report = ValidateUseCase::execute(&loaded.config, loaded.warnings)
        .with_context(|| format!("Invalid configuration in {}", loaded.path.display()))?;

    if json {
        output::emit(&output::validation_json(&report, &loaded.path))?;
    } else {
        println!("{}", output::render_validation(&report, &loaded.path));
    }
    Ok(())
}
