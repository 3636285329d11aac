//! CLI command implementations
//!
//! Each command loads the record file into a base array, builds one index on
//! the requested field and answers a single question about it.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::{json, Value};
use tracing::info;

use crate::index::{json_field, BTreeIndex, IndexConfig, IndexKey};

use super::args::{Cli, Command, SourceArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Index over JSON records
pub type JsonIndex = BTreeIndex<IndexKey, Value>;

/// Parse arguments, run the command and print its response.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    match run_command(cli.command) {
        Ok(data) => write_response(data),
        Err(e) => {
            write_error(e.code(), &e.to_string())?;
            Err(e)
        }
    }
}

/// Run a command and return the `data` payload of its response.
pub fn run_command(command: Command) -> CliResult<Value> {
    match command {
        Command::Find {
            source,
            method,
            value,
        } => {
            let index = open(&source)?;
            let pivot = IndexKey::parse_literal(&value);
            let positions = index.find(&pivot, method);
            info!(field = %source.field, %method, pivot = %pivot, matches = positions.len(), "find");
            Ok(json!({
                "field": source.field,
                "method": method,
                "value": value,
                "count": positions.len(),
                "positions": positions,
            }))
        }
        Command::Range {
            source,
            from,
            to,
            exclude_from,
            exclude_to,
        } => {
            let index = open(&source)?;
            let lower = IndexKey::parse_literal(&from);
            let upper = IndexKey::parse_literal(&to);
            let positions = index.get_range(&lower, &upper, !exclude_from, !exclude_to);
            info!(field = %source.field, from = %lower, to = %upper, matches = positions.len(), "range");
            Ok(json!({
                "field": source.field,
                "from": from,
                "to": to,
                "count": positions.len(),
                "positions": positions,
            }))
        }
        Command::Stats { source } => {
            let index = open(&source)?;
            Ok(serde_json::to_value(index.stats())?)
        }
        Command::Audit { source } => {
            let index = open(&source)?;
            index.audit()?;
            Ok(json!({
                "field": source.field,
                "consistent": true,
                "positions": index.position_count(),
            }))
        }
    }
}

/// Load a JSON array of records from `path`.
pub fn load_records(path: &Path) -> CliResult<Vec<Value>> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::data(format!("Failed to read {}: {}", path.display(), e)))?;

    match serde_json::from_str::<Value>(&content)? {
        Value::Array(records) => Ok(records),
        _ => Err(CliError::data(format!(
            "{} must contain a JSON array of records",
            path.display()
        ))),
    }
}

/// Build an index on `field` over `records`.
pub fn build_index(records: Vec<Value>, field: &str, config: IndexConfig) -> JsonIndex {
    let base = Arc::new(RwLock::new(records));
    BTreeIndex::with_config(base, json_field(field), config)
}

fn open(source: &SourceArgs) -> CliResult<JsonIndex> {
    let config = match &source.config {
        Some(path) => IndexConfig::load(path)?,
        None => IndexConfig::named(source.field.clone()),
    };
    let records = load_records(&source.data)?;
    info!(data = %source.data.display(), records = records.len(), index = %config.name, "loaded records");
    Ok(build_index(records, &source.field, config))
}
