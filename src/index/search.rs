//! Search methods for directional lookups

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::IndexError;

/// Comparison applied against the pivot value in `BTreeIndex::find`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMethod {
    /// Equal
    Eq,
    /// Greater than
    Gt,
    /// Greater than or equal
    Gte,
    /// Less than
    Lt,
    /// Less than or equal
    Lte,
}

impl SearchMethod {
    /// All methods, in discriminant order
    pub const ALL: [SearchMethod; 5] = [
        SearchMethod::Eq,
        SearchMethod::Gt,
        SearchMethod::Gte,
        SearchMethod::Lt,
        SearchMethod::Lte,
    ];

    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMethod::Eq => "eq",
            SearchMethod::Gt => "gt",
            SearchMethod::Gte => "gte",
            SearchMethod::Lt => "lt",
            SearchMethod::Lte => "lte",
        }
    }
}

impl fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SearchMethod {
    type Err = IndexError;

    /// Accepts the lowercase names and the usual comparison operators.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "eq" | "=" | "==" => Ok(SearchMethod::Eq),
            "gt" | ">" => Ok(SearchMethod::Gt),
            "gte" | ">=" => Ok(SearchMethod::Gte),
            "lt" | "<" => Ok(SearchMethod::Lt),
            "lte" | "<=" => Ok(SearchMethod::Lte),
            _ => Err(IndexError::InvalidSearchMethod(s.to_string())),
        }
    }
}

impl TryFrom<u8> for SearchMethod {
    type Error = IndexError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        SearchMethod::ALL
            .get(usize::from(value))
            .copied()
            .ok_or_else(|| IndexError::InvalidSearchMethod(value.to_string()))
    }
}
