//! Output Rendering
//!
//! Text summaries for humans and JSON documents for scripting.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::Path;

use serde_json::json;

use crate::application::{Synthesis, ValidationReport};
use crate::config::ConfigWarning;
use crate::domain::entities::{ProvisioningPlan, Resource};
use crate::domain::services::{PipelineOutline, ServiceHandle};

/// Write a single JSON document followed by a newline.
pub fn write_json(out: &mut impl Write, value: &serde_json::Value) -> io::Result<()> {
    let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")
}

/// Convenience helper that writes to stdout.
pub fn emit(value: &serde_json::Value) -> io::Result<()> {
    let mut out = io::stdout().lock();
    write_json(&mut out, value)
}

fn binding_label(service: &ServiceHandle) -> String {
    match service.zone.delegation() {
        Some(kind) => kind.to_string(),
        None => "preset".to_string(),
    }
}

/// Multi-line summary of an outline and its plan
pub fn render_summary(outline: &PipelineOutline, plan: &ProvisioningPlan) -> String {
    let mut out = String::new();
    let pipeline_name = plan
        .get(outline.pipeline.id())
        .and_then(|r| match r {
            Resource::Pipeline(spec) => Some(spec.name.as_str()),
            _ => None,
        })
        .unwrap_or_else(|| outline.pipeline.logical_id());

    let _ = writeln!(
        out,
        "Pipeline {} (stack {})",
        pipeline_name,
        outline.stack.logical_id()
    );
    let _ = writeln!(
        out,
        "  synth input: {}@{}",
        outline.synth_input.repository, outline.synth_input.branch
    );
    if !outline.additional_inputs.is_empty() {
        let names: Vec<&str> = outline.additional_inputs.keys().map(String::as_str).collect();
        let _ = writeln!(out, "  additional inputs: {}", names.join(", "));
    }

    for (position, stage) in outline.stages.iter().enumerate() {
        let _ = writeln!(
            out,
            "Stage {}: {} (account {}, {})",
            position + 1,
            stage.label,
            stage.account_id,
            stage.region
        );
        for service in &stage.services {
            let _ = writeln!(
                out,
                "  {} -> {} [{}]",
                service.service_name,
                service.domain_name,
                binding_label(service)
            );
        }
    }

    let _ = write!(
        out,
        "{} resources, {} dependencies",
        plan.len(),
        plan.dependencies.len()
    );
    out
}

pub fn render_synthesis(synthesis: &Synthesis) -> String {
    format!(
        "{}\nDigest: {}",
        render_summary(&synthesis.outline, &synthesis.plan),
        synthesis.digest
    )
}

pub fn synthesis_json(synthesis: &Synthesis) -> serde_json::Value {
    json!({
        "digest": synthesis.digest.as_str(),
        "outline": synthesis.outline,
        "plan": synthesis.plan,
    })
}

pub fn render_warning(warning: &ConfigWarning) -> String {
    let mut line = format!(
        "warning: unknown key '{}' in {}",
        warning.key,
        warning.location()
    );
    if let Some(suggestion) = &warning.suggestion {
        let _ = write!(line, " (did you mean '{}'?)", suggestion);
    }
    line
}

pub fn render_validation(report: &ValidationReport, path: &Path) -> String {
    let mut out = String::new();
    for warning in &report.warnings {
        let _ = writeln!(out, "{}", render_warning(warning));
    }
    let _ = writeln!(out, "Configuration {} is valid", path.display());
    for stage in &report.stages {
        let marker = if stage.production { " (production)" } else { "" };
        let _ = writeln!(out, "  {}{}", stage.label, marker);
        for (service, domain) in &stage.services {
            let _ = writeln!(out, "    {} -> {}", service, domain);
        }
    }
    out.trim_end().to_string()
}

pub fn validation_json(report: &ValidationReport, path: &Path) -> serde_json::Value {
    json!({
        "valid": true,
        "config": path.display().to_string(),
        "stages": report.stages.iter().map(|s| json!({
            "name": s.label,
            "production": s.production,
            "services": s.services.iter().map(|(name, domain)| json!({
                "name": name,
                "domain": domain,
            })).collect::<Vec<_>>(),
        })).collect::<Vec<_>>(),
        "warnings": report.warnings.iter().map(|w| json!({
            "key": w.key,
            "file": w.file.display().to_string(),
            "line": w.line,
            "suggestion": w.suggestion,
        })).collect::<Vec<_>>(),
    })
}
