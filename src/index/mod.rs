//! Secondary index engine for caller-owned record arrays
//!
//! Indexes are derived state: the base array is the source of truth and the
//! index only stores positions into it.
//!
//! # Design Principles
//!
//! - Non-owning: records are reached through `BaseArray`, only on rebuild/audit
//! - Ordered: `BTreeMap` traversal drives every directional and range query
//! - Self-healing: an `rm` with no matching entry triggers a full rebuild
//!
//! # Invariants
//!
//! - At most one entry per distinct value, never an empty one
//! - After each completed `put`/`rm`, every valid position appears exactly
//!   once, under the value its record holds
//! - Queries return copies; no entry escapes the index lock

mod base;
mod btree;
mod config;
mod entry;
mod errors;
mod key;
mod search;
mod stats;

pub use base::BaseArray;
pub use btree::BTreeIndex;
pub use config::IndexConfig;
pub use entry::{remove_position, IndexEntry, Position};
pub use errors::{IndexError, IndexResult};
pub use key::{json_field, IndexKey};
pub use search::SearchMethod;
pub use stats::IndexStats;
