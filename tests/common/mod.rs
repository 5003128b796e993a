//! Common test utilities for stackplan CLI and scenario tests.
//!
//! - `SAMPLE_CONFIG`: the two-stage demo deployment
//! - `TestEnv`: isolated working directory with a config file
//! - `stackplan()`: a `Command` for the built binary with a clean environment

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use stackplan::DeploymentConfig;
use tempfile::TempDir;

pub const SAMPLE_CONFIG: &str = include_str!("../../demos/macrosurfer.toml");

/// Environment variables the binary reads; cleared for every invocation.
const ISOLATED_VARS: &[&str] = &[
    "RUST_LOG",
    "DEPLOYMENT_ENV",
    "STACKPLAN_CONFIG",
    "STACKPLAN_PACKAGE_MODE",
    "STACKPLAN_LOCAL_PACKAGE_ROOT",
    "STACKPLAN_PRODUCTION_LABEL",
    "STACKPLAN_SELF_MUTATION",
];

pub fn sample_config() -> DeploymentConfig {
    toml::from_str(SAMPLE_CONFIG).unwrap()
}

pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Working directory containing `stackplan.toml` with the demo config
    pub fn with_sample() -> Self {
        let env = Self::new();
        env.write("stackplan.toml", SAMPLE_CONFIG);
        env
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// Binary invocation rooted at this environment
    pub fn stackplan(&self) -> Command {
        let mut cmd = stackplan();
        cmd.current_dir(self.path())
            .env("XDG_CONFIG_HOME", self.path().join("xdg"));
        cmd
    }
}

pub fn stackplan() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_stackplan"));
    for var in ISOLATED_VARS {
        cmd.env_remove(var);
    }
    cmd
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
