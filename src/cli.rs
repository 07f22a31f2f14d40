//! Command-line interface definition using clap
//!
//! Provides structured argument parsing with automatic help generation.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// =============================================================================
// CLI Definition
// =============================================================================

/// Ordered log delivery for long-running video jobs
#[derive(Parser, Debug, Default)]
#[command(name = "framelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose debug output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (default: ./framelog.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Logs root (overrides config)
    #[arg(long, value_name = "DIR")]
    pub logs_dir: Option<PathBuf>,

    /// Drain on the producer's thread instead of a dedicated consumer
    #[arg(long)]
    pub inline: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What to run
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the demo jobs in the terminal UI (default)
    Watch,

    /// Run the demo jobs headless, mirroring messages to stderr
    Run {
        /// Number of concurrent jobs (overrides config)
        #[arg(long)]
        jobs: Option<usize>,

        /// Frames per job (overrides config)
        #[arg(long)]
        frames: Option<u32>,
    },

    /// Dump the effective configuration into the config channel
    Snapshot {
        /// Append instead of overwriting the previous dump
        #[arg(long)]
        append: bool,
    },
}

// =============================================================================
// Tests
// =============================================================================
