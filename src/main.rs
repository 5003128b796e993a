//! stackplan CLI - deployment topology planner
//!
//! Usage: stackplan <COMMAND>
//!
//! Commands:
//!   synth           Build the provisioning plan
//!   resolve-domain  Print the child zone name for a stage
//!   validate        Load and validate configuration

mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stackplan::presentation::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Synth { config, out } => {
            commands::synth::cmd_synth(config.as_deref(), out.as_deref(), cli.json)
        }
        Commands::ResolveDomain {
            stage,
            root,
            base,
            production_label,
        } => commands::resolve_domain::cmd_resolve_domain(
            &stage,
            &root,
            &base,
            &production_label,
            cli.json,
        ),
        Commands::Validate { config } => {
            commands::validate::cmd_validate(config.as_deref(), cli.json)
        }
    }
}

/// Logs go to stderr; RUST_LOG wins over -v.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}
