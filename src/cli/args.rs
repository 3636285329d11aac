//! CLI argument definitions using clap
//!
//! Commands:
//! - posindex find --data <path> --field <name> --method <m> --value <lit>
//! - posindex range --data <path> --field <name> --from <lit> --to <lit>
//! - posindex stats --data <path> --field <name>
//! - posindex audit --data <path> --field <name>

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::index::SearchMethod;

/// posindex - ordered secondary indexes over JSON record arrays
#[derive(Parser, Debug)]
#[command(name = "posindex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where the records come from and which field to index
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to a JSON file holding an array of records
    #[arg(long)]
    pub data: PathBuf,

    /// Record field to index
    #[arg(long)]
    pub field: String,

    /// Path to an index configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Positions whose field compares to a value
    Find {
        #[command(flatten)]
        source: SourceArgs,

        /// eq, gt, gte, lt or lte (operators like >= also accepted)
        #[arg(long, default_value = "eq")]
        method: SearchMethod,

        /// Pivot value (JSON scalar, or a bare string)
        #[arg(long)]
        value: String,
    },

    /// Positions whose field lies between two values
    Range {
        #[command(flatten)]
        source: SourceArgs,

        /// Lower bound (swapped with --to when larger; the exclude flags
        /// still apply to the lower and upper bound)
        #[arg(long)]
        from: String,

        /// Upper bound
        #[arg(long)]
        to: String,

        /// Leave out records equal to the lower bound
        #[arg(long)]
        exclude_from: bool,

        /// Leave out records equal to the upper bound
        #[arg(long)]
        exclude_to: bool,
    },

    /// Print index statistics
    Stats {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Build the index and verify it against the records
    Audit {
        #[command(flatten)]
        source: SourceArgs,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
