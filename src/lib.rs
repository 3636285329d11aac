//! posindex - Ordered secondary indexes over caller-owned record arrays
//!
//! The caller owns a position-addressed array of records and reports each
//! mutation to a `BTreeIndex`, which answers equality, directional and range
//! lookups with the positions holding matching values.

pub mod cli;
pub mod index;

pub use index::{BTreeIndex, BaseArray, IndexConfig, IndexError, IndexKey, IndexResult, SearchMethod};
