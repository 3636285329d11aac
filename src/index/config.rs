//! Index configuration
//!
//! Loaded from a JSON object; every field is optional:
//!
//! ```json
//! { "name": "users_by_age", "heal_on_missing_entry": true, "sorted_positions": false }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{IndexError, IndexResult};

/// Configuration for a single index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Label used in logs and stats
    #[serde(default = "default_name")]
    pub name: String,

    /// Rebuild when `rm` finds no entry for the record's value.
    /// When false the call is logged and ignored.
    #[serde(default = "default_heal")]
    pub heal_on_missing_entry: bool,

    /// Sort each entry's positions ascending in query results
    #[serde(default)]
    pub sorted_positions: bool,
}

fn default_name() -> String {
    "index".to_string()
}
fn default_heal() -> bool {
    true
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            heal_on_missing_entry: default_heal(),
            sorted_positions: false,
        }
    }
}

impl IndexConfig {
    /// Default config under a different name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> IndexResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            IndexError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(content: &str) -> IndexResult<Self> {
        let config: IndexConfig = serde_json::from_str(content)
            .map_err(|e| IndexError::Config(format!("Invalid config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> IndexResult<()> {
        if self.name.trim().is_empty() {
            return Err(IndexError::Config("name must not be empty".to_string()));
        }
        Ok(())
    }
}
