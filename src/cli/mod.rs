//! CLI module for posindex
//!
//! Provides one-shot commands over a JSON record file:
//! - find: directional lookup against a pivot
//! - range: two-sided range lookup
//! - stats: index sizes and counters
//! - audit: verify the index against the records

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command, SourceArgs};
pub use commands::{build_index, load_records, run, run_command, JsonIndex};
pub use errors::{CliError, CliResult};
pub use io::{write_error, write_error_to, write_response, write_response_to};
