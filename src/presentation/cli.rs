//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! Global flags (--json, --verbose) are inherited by all subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::services::DEFAULT_PRODUCTION_LABEL;

/// stackplan - deployment topology planner
#[derive(Parser, Debug)]
#[command(name = "stackplan")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format for CI
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the provisioning plan and print a summary (or the plan as JSON)
    Synth {
        /// Configuration file (TOML or YAML)
        #[arg(short, long, env = "STACKPLAN_CONFIG")]
        config: Option<PathBuf>,

        /// Also write the plan JSON to this file
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Print the child zone name a stage resolves to
    ResolveDomain {
        /// Stage label
        #[arg(long)]
        stage: String,

        /// Root domain, e.g. example.com
        #[arg(long)]
        root: String,

        /// Base subdomain
        #[arg(long, default_value = "service")]
        base: String,

        /// Stage label treated as production
        #[arg(long, default_value = DEFAULT_PRODUCTION_LABEL)]
        production_label: String,
    },

    /// Load and validate configuration without building a plan
    Validate {
        /// Configuration file (TOML or YAML)
        #[arg(short, long, env = "STACKPLAN_CONFIG")]
        config: Option<PathBuf>,
    },
}
