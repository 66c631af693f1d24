use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod domain;
mod services;

pub use cli::*;
pub use commands::*;
pub use domain::models::*;
pub use services::detectors::*;
pub use services::engine::*;
pub use services::export::*;
pub use services::identity::*;
pub use services::ingest::*;
pub use services::output::*;
pub use services::policy::*;
pub use services::sample::*;

fn init_tracing() {
    // stderr keeps stdout clean for --json and piped CSV
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "agrigov=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let policy = load_policy(cli.policy.as_deref())?;

    if handle_audit_commands(&cli, &policy)? {
        return Ok(());
    }
    if handle_tool_commands(&cli, &policy)? {
        return Ok(());
    }
    Ok(())
}
