use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Demeter measured soil-water toolkit.
#[derive(Parser)]
#[command(
    name = "demeter",
    version,
    about = "Measured soil-water tools for FAO-56 crop water balance modeling"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Derive soil-water deficit and root-zone tables from measured content.
    Derive(DeriveArgs),
    /// Compute goodness-of-fit statistics for a measured vs. modeled series.
    Evaluate(EvaluateArgs),
}

/// Arguments for the `derive` subcommand.
#[derive(clap::Args)]
pub struct DeriveArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "demeter.toml")]
    pub config: PathBuf,
}

/// Arguments for the `evaluate` subcommand.
#[derive(clap::Args)]
pub struct EvaluateArgs {
    /// Path to the measured series file (one value per line).
    #[arg(long)]
    pub measured: PathBuf,

    /// Path to the modeled series file (one value per line).
    #[arg(long)]
    pub modeled: PathBuf,

    /// Path for the fit-summary JSON output (stdout if omitted).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
