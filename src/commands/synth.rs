use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use stackplan::application::synthesize;
use stackplan::presentation::output;

use super::load_config;

pub fn cmd_synth(config: Option<&Path>, out: Option<&Path>, json: bool) -> Result<()> {
    let loaded = load_config(config)?;
    for warning in &loaded.warnings {
        eprintln!("{}", output::render_warning(warning));
    }

    let synthesis = synthesize(&loaded.config)
        .with_context(|| format!("Failed to build plan from {}", loaded.path.display()))?;

    if let Some(out) = out {
        let plan_json = synthesis.plan.to_json_pretty()?;
        fs::write(out, plan_json + "\n")
            .with_context(|| format!("Failed to write plan to {}", out.display()))?;
    }

    if json {
        output::emit(&output::synthesis_json(&synthesis))?;
    } else {
        println!("{}", output::render_synthesis(&synthesis));
        if let Some(out) = out {
            println!("Plan written to {}", out.display());
        }
    }
    Ok(())
}
