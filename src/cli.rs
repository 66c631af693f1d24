use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "agrigov",
    version,
    about = "Forensic governance audit for Jamabandi land records"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Policy file (defaults to ~/.config/agrigov/policy.toml, then built-in standard profile)"
    )]
    pub policy: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the governance protocol over a transliterated CSV
    Audit {
        input: PathBuf,
        #[arg(long, help = "Write the final registry CSV here")]
        out: Option<PathBuf>,
    },
    /// Check that a CSV carries the columns the protocol needs
    Validate { input: PathBuf },
    /// Generate the offline farmer ID for a name and plot
    Fid {
        name: String,
        khasra: String,
        #[arg(long)]
        village_code: Option<String>,
        #[arg(long)]
        device_id: Option<String>,
    },
    /// Score how closely two names match
    Match { left: String, right: String },
    /// Run the land and mutation detectors on ad hoc text
    Classify {
        land_type: String,
        #[arg(long, default_value = "")]
        remarks: String,
        #[arg(long)]
        mutation_status: Option<String>,
    },
    Policy {
        #[command(subcommand)]
        command: PolicyCommands,
    },
    /// Emit the demonstration registry
    Sample {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PolicyCommands {
    /// Print the effective policy
    Show,
}
