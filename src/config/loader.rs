//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{ConfigWarning, PackagePathMode};
use crate::error::{PlanError, PlanResult};

use super::types::DeploymentConfig;

/// Project configuration file, looked up in the working directory
pub const PROJECT_CONFIG_FILE: &str = "stackplan.toml";

/// Supported configuration syntaxes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    /// Pick the syntax from the file extension
    pub fn from_path(path: &Path) -> PlanResult<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match extension.as_str() {
            "toml" => Ok(ConfigFormat::Toml),
            "yaml" | "yml" => Ok(ConfigFormat::Yaml),
            _ => Err(PlanError::UnsupportedFormat {
                file: path.to_path_buf(),
                extension,
            }),
        }
    }
}

/// A configuration together with where it came from
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub config: DeploymentConfig,
    pub warnings: Vec<ConfigWarning>,
    pub path: PathBuf,
}

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> PlanResult<(DeploymentConfig, Vec<ConfigWarning>)> {
    let format = ConfigFormat::from_path(path)?;
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, format, path)
}

/// Parse configuration text; `file` is only used for diagnostics.
pub fn parse_with_warnings(
    content: &str,
    format: ConfigFormat,
    file: &Path,
) -> PlanResult<(DeploymentConfig, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let invalid = |message: String| PlanError::InvalidConfig {
        file: file.to_path_buf(),
        message,
    };

    let config: DeploymentConfig = match format {
        ConfigFormat::Toml => {
            let deserializer = toml::de::Deserializer::new(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| invalid(e.to_string()))?
        }
        ConfigFormat::Yaml => {
            let deserializer = serde_yaml_ng::Deserializer::from_str(content);
            serde_ignored::deserialize(deserializer, |p| unknown_paths.push(p.to_string()))
                .map_err(|e| invalid(e.to_string()))?
        }
    };

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                file: file.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Locations searched when no explicit path is given, in order
pub fn candidate_paths(working_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = vec![working_dir.join(PROJECT_CONFIG_FILE)];
    if let Some(user_config_dir) = dirs::config_dir() {
        candidates.push(user_config_dir.join("stackplan").join("config.toml"));
    }
    candidates
}

/// Load from an explicit path, the project config, or the user config.
///
/// There are no built-in defaults: a plan needs a root zone and stages.
pub fn discover(explicit: Option<&Path>, working_dir: &Path) -> PlanResult<LoadedConfig> {
    let candidates = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => candidate_paths(working_dir),
    };

    for path in &candidates {
        if path.is_file() {
            let (config, warnings) = load_with_warnings(path)?;
            tracing::debug!(path = %path.display(), "loaded configuration");
            return Ok(LoadedConfig {
                config: with_env_overrides(config),
                warnings,
                path: path.clone(),
            });
        }
    }

    Err(PlanError::ConfigNotFound {
        searched: candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", "),
    })
}

/// Apply environment variable overrides (STACKPLAN_* prefix)
pub fn with_env_overrides(config: DeploymentConfig) -> DeploymentConfig {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Apply overrides read through `lookup`.
///
/// `STACKPLAN_PACKAGE_MODE` wins over the legacy `DEPLOYMENT_ENV=local`.
pub fn apply_overrides<F>(mut config: DeploymentConfig, lookup: F) -> DeploymentConfig
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("DEPLOYMENT_ENV").is_some_and(|v| v.trim().eq_ignore_ascii_case("local")) {
        config.packaging.mode = PackagePathMode::Local;
    }

    // STACKPLAN_PACKAGE_MODE
    if let Some(mode) = lookup("STACKPLAN_PACKAGE_MODE") {
        match mode.trim().to_lowercase().as_str() {
            "local" => config.packaging.mode = PackagePathMode::Local,
            "pipeline" => config.packaging.mode = PackagePathMode::Pipeline,
            other => tracing::warn!(value = other, "ignoring unknown STACKPLAN_PACKAGE_MODE"),
        }
    }

    // STACKPLAN_LOCAL_PACKAGE_ROOT
    if let Some(root) = lookup("STACKPLAN_LOCAL_PACKAGE_ROOT") {
        if !root.trim().is_empty() {
            config.packaging.local_root = PathBuf::from(root);
        }
    }

    // STACKPLAN_PRODUCTION_LABEL
    if let Some(label) = lookup("STACKPLAN_PRODUCTION_LABEL") {
        if !label.trim().is_empty() {
            config.domain.production_label = label.trim().to_string();
        }
    }

    // STACKPLAN_SELF_MUTATION
    if let Some(val) = lookup("STACKPLAN_SELF_MUTATION") {
        match val.trim().to_lowercase().as_str() {
            "true" | "1" => config.pipeline.self_mutation = true,
            "false" | "0" => config.pipeline.self_mutation = false,
            other => tracing::warn!(value = other, "ignoring unknown STACKPLAN_SELF_MUTATION"),
        }
    }

    config
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "service_prefix",
        "pipeline",
        "name",
        "stack_name",
        "account",
        "region",
        "connection_arn",
        "source",
        "branch",
        "synth_commands",
        "self_mutation",
        "docker_credentials_secret_arn",
        "asset_cache",
        "asset_compute_type",
        "repositories",
        "stages",
        "domain",
        "production_label",
        "root_zone",
        "id",
        "name_servers",
        "services",
        "subdomain",
        "preset",
        "hosted_zone_id",
        "hosted_zone_name",
        "certificate_arn",
        "health_check_path",
        "cpu",
        "memory",
        "min_capacity",
        "max_capacity",
        "dockerfile",
        "package_repo",
        "port",
        "non_production",
        "packaging",
        "mode",
        "local_root",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
