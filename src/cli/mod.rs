use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cfst-build")]
#[command(about = "Package Cloudflare SpeedTest into a standalone executable")]
#[command(version)]
pub struct Cli {
    /// Build the statically linked Linux ARM64 binary for OpenWRT
    #[arg(long = "static")]
    pub static_build: bool,

    /// Resolve and print the build plan without installing or building
    #[arg(long)]
    pub dry_run: bool,

    /// Print the plan as JSON (with --dry-run)
    #[arg(long, requires = "dry_run")]
    pub json: bool,

    /// Directory containing the entry script
    #[arg(short = 'C', long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Show debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

pub mod build;
