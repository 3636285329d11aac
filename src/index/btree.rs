//! BTreeMap-based secondary index over a caller-owned base array
//!
//! The tree maps each distinct field value to the positions holding it.
//! All state sits behind one `parking_lot::RwLock`: queries share it,
//! mutations and rebuilds hold it exclusively.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use super::base::BaseArray;
use super::config::IndexConfig;
use super::entry::{IndexEntry, Position};
use super::errors::{IndexError, IndexResult};
use super::search::SearchMethod;
use super::stats::{Counters, IndexStats};

type Tree<K> = BTreeMap<K, IndexEntry>;

/// Ordered secondary index mapping field values to base-array positions.
///
/// Callers mutate the base array themselves and then report each change
/// with `put`/`rm` in the order the swap-delete protocol requires:
///
/// 1. `rm(deleted, pos)`
/// 2. `rm(last, last_pos)`
/// 3. swap the last record into `pos` and shrink the array
/// 4. `put(moved, pos)`
///
/// `swap_delete` runs those steps under one critical section.
///
/// Lock order is always index, then base array. Do not call into the index
/// while holding a write guard on the base array.
pub struct BTreeIndex<K, R> {
    config: IndexConfig,
    tree: RwLock<Tree<K>>,
    base: Arc<dyn BaseArray<R>>,
    field: Box<dyn Fn(&R) -> K + Send + Sync>,
    counters: Counters,
}

impl<K: Ord, R> BTreeIndex<K, R> {
    /// Build an index over `base` keyed by `field`, with default config.
    pub fn new<B, F>(base: Arc<B>, field: F) -> Self
    where
        B: BaseArray<R> + 'static,
        F: Fn(&R) -> K + Send + Sync + 'static,
    {
        Self::with_config(base, field, IndexConfig::default())
    }

    /// Build an index with explicit config. Performs the initial rebuild.
    pub fn with_config<B, F>(base: Arc<B>, field: F, config: IndexConfig) -> Self
    where
        B: BaseArray<R> + 'static,
        F: Fn(&R) -> K + Send + Sync + 'static,
    {
        let base: Arc<dyn BaseArray<R>> = base;
        let index = Self {
            config,
            tree: RwLock::new(BTreeMap::new()),
            base,
            field: Box::new(field),
            counters: Counters::default(),
        };
        index.rebuild();
        index
    }

    /// The config this index was built with
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Discard every entry and rescan the base array.
    pub fn rebuild(&self) {
        let mut tree = self.tree.write();
        self.rebuild_locked(&mut tree);
    }

    /// Positions holding exactly `value`; empty when none do.
    pub fn get(&self, value: &K) -> Vec<Position> {
        let tree = self.tree.read();
        let mut out = Vec::new();
        if let Some(entry) = tree.get(value) {
            entry.extend_into(&mut out, self.config.sorted_positions);
        }
        out
    }

    /// Record that `record` now sits at `position`.
    ///
    /// Must be called exactly once per (record, position) pair; a second call
    /// duplicates the position.
    pub fn put(&self, record: &R, position: Position) {
        let value = (self.field)(record);
        let mut tree = self.tree.write();
        insert_position(&mut tree, value, position);
        self.counters.record_put();
    }

    /// Record that `record` no longer sits at `position`.
    ///
    /// When no entry exists for the record's value the index is stale and is
    /// rebuilt (unless `heal_on_missing_entry` is off). Lookup and update
    /// happen in one exclusive section.
    pub fn rm(&self, record: &R, position: Position) {
        let value = (self.field)(record);
        let mut tree = self.tree.write();
        if !self.remove_locked(&mut tree, &value, position) {
            self.heal_locked(&mut tree, position);
        }
    }

    /// Positions whose value compares to `value` as `method` says.
    ///
    /// `Gt`/`Gte` walk upward from the pivot and `Lt`/`Lte` walk downward, so
    /// entries closest to the pivot come first.
    pub fn find(&self, value: &K, method: SearchMethod) -> Vec<Position> {
        let tree = self.tree.read();
        let sorted = self.config.sorted_positions;
        let mut out = Vec::new();
        match method {
            SearchMethod::Eq => {
                if let Some(entry) = tree.get(value) {
                    entry.extend_into(&mut out, sorted);
                }
            }
            SearchMethod::Gt => {
                collect(tree.range((Bound::Excluded(value), Bound::Unbounded)), &mut out, sorted)
            }
            SearchMethod::Gte => {
                collect(tree.range((Bound::Included(value), Bound::Unbounded)), &mut out, sorted)
            }
            SearchMethod::Lt => collect(
                tree.range((Bound::Unbounded, Bound::Excluded(value))).rev(),
                &mut out,
                sorted,
            ),
            SearchMethod::Lte => collect(
                tree.range((Bound::Unbounded, Bound::Included(value))).rev(),
                &mut out,
                sorted,
            ),
        }
        out
    }

    /// Positions with values between `from` and `to`, ascending by value.
    ///
    /// Bounds given in reverse are swapped; the flags are not, so
    /// `include_from` always applies to the lower bound and `include_to` to
    /// the upper one. A zero-width range is non-empty only when both ends are
    /// inclusive.
    pub fn get_range(&self, from: &K, to: &K, include_from: bool, include_to: bool) -> Vec<Position> {
        let (from, to) = if from > to { (to, from) } else { (from, to) };

        let tree = self.tree.read();
        let sorted = self.config.sorted_positions;
        let mut out = Vec::new();

        if from == to {
            if include_from && include_to {
                if let Some(entry) = tree.get(from) {
                    entry.extend_into(&mut out, sorted);
                }
            }
            return out;
        }

        let lower = if include_from {
            Bound::Included(from)
        } else {
            Bound::Excluded(from)
        };
        let upper = if include_to {
            Bound::Included(to)
        } else {
            Bound::Excluded(to)
        };
        collect(tree.range((lower, upper)), &mut out, sorted);
        out
    }

    /// Run the whole swap-delete protocol for `position` atomically.
    ///
    /// `base` must be the array this index was built over, otherwise
    /// `ForeignBaseArray` is returned and nothing changes. Returns the removed
    /// record, or `None` when `position` is out of bounds.
    pub fn swap_delete(&self, base: &RwLock<Vec<R>>, position: Position) -> IndexResult<Option<R>> {
        let tracked = Arc::as_ptr(&self.base) as *const ();
        if !std::ptr::eq(tracked, base as *const RwLock<Vec<R>> as *const ()) {
            return Err(IndexError::ForeignBaseArray);
        }

        let mut tree = self.tree.write();
        let mut records = base.write();

        let Some(last) = records.len().checked_sub(1) else {
            return Ok(None);
        };
        if position > last {
            return Ok(None);
        }

        let deleted = (self.field)(&records[position]);
        let mut stale = !self.remove_locked(&mut tree, &deleted, position);

        let removed = if position == last {
            records.pop()
        } else {
            let moved = (self.field)(&records[last]);
            stale |= !self.remove_locked(&mut tree, &moved, last);
            let removed = records.swap_remove(position);
            insert_position(&mut tree, moved, position);
            self.counters.record_put();
            Some(removed)
        };
        drop(records);

        if stale {
            self.heal_locked(&mut tree, position);
        }
        Ok(removed)
    }

    /// Number of distinct values
    pub fn len(&self) -> usize {
        self.tree.read().len()
    }

    /// Whether no value is indexed
    pub fn is_empty(&self) -> bool {
        self.tree.read().is_empty()
    }

    /// Number of positions across all entries
    pub fn position_count(&self) -> usize {
        self.tree.read().values().map(IndexEntry::len).sum()
    }

    /// Snapshot of sizes and counters
    pub fn stats(&self) -> IndexStats {
        let tree = self.tree.read();
        let positions = tree.values().map(IndexEntry::len).sum();
        self.counters.snapshot(&self.config.name, tree.len(), positions)
    }

    /// Compare incremental state against a fresh scan of the base array.
    ///
    /// Read-only: a failed audit leaves the index as it was; call `rebuild`
    /// to repair it.
    pub fn audit(&self) -> IndexResult<()>
    where
        K: fmt::Debug,
    {
        let tree = self.tree.read();

        let mut actual: Vec<K> = Vec::new();
        self.base.scan(&mut |_, record| actual.push((self.field)(record)));

        let result = audit_tree(&tree, &actual);
        if let Err(err) = &result {
            warn!(index = %self.config.name, error = %err, "index audit failed");
        }
        result
    }

    /// Drop `position` from the entry for `value`. Returns false when the
    /// value has no entry.
    fn remove_locked(&self, tree: &mut Tree<K>, value: &K, position: Position) -> bool {
        let Some(entry) = tree.get_mut(value) else {
            return false;
        };
        if entry.len() > 1 {
            entry.remove(position);
            if entry.is_empty() {
                tree.remove(value);
            }
        } else {
            tree.remove(value);
        }
        self.counters.record_removal();
        true
    }

    fn heal_locked(&self, tree: &mut Tree<K>, position: Position) {
        if !self.config.heal_on_missing_entry {
            warn!(index = %self.config.name, position, "no entry for removed record, ignoring");
            return;
        }
        warn!(index = %self.config.name, position, "no entry for removed record, rebuilding");
        self.counters.record_heal();
        self.rebuild_locked(tree);
    }

    fn rebuild_locked(&self, tree: &mut Tree<K>) {
        let mut fresh = BTreeMap::new();
        let mut positions = 0usize;
        self.base.scan(&mut |position, record| {
            insert_position(&mut fresh, (self.field)(record), position);
            positions += 1;
        });
        *tree = fresh;
        self.counters.record_rebuild();
        debug!(index = %self.config.name, keys = tree.len(), positions, "index rebuilt");
    }
}

impl<K, R> fmt::Debug for BTreeIndex<K, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BTreeIndex")
            .field("config", &self.config)
            .field("keys", &self.tree.read().len())
            .finish_non_exhaustive()
    }
}

fn insert_position<K: Ord>(tree: &mut Tree<K>, value: K, position: Position) {
    match tree.entry(value) {
        Entry::Occupied(mut occupied) => occupied.get_mut().push(position),
        Entry::Vacant(vacant) => {
            vacant.insert(IndexEntry::new(position));
        }
    }
}

fn collect<'a, K: 'a, I>(entries: I, out: &mut Vec<Position>, sorted: bool)
where
    I: Iterator<Item = (&'a K, &'a IndexEntry)>,
{
    for (_, entry) in entries {
        entry.extend_into(out, sorted);
    }
}

/// Check `tree` against the values the base array actually holds, one per
/// position.
fn audit_tree<K: Ord + fmt::Debug>(tree: &Tree<K>, actual: &[K]) -> IndexResult<()> {
    let mut seen = vec![false; actual.len()];

    for (value, entry) in tree {
        if entry.is_empty() {
            return Err(IndexError::inconsistent(
                0,
                format!("entry for {:?} has no positions", value),
            ));
        }
        for &position in entry.positions() {
            let Some(held) = actual.get(position) else {
                return Err(IndexError::inconsistent(
                    position,
                    format!("recorded under {:?} but beyond the base array", value),
                ));
            };
            if held != value {
                return Err(IndexError::inconsistent(
                    position,
                    format!("recorded under {:?} but the record holds {:?}", value, held),
                ));
            }
            if std::mem::replace(&mut seen[position], true) {
                return Err(IndexError::inconsistent(
                    position,
                    format!("recorded more than once under {:?}", value),
                ));
            }
        }
    }

    match seen.iter().position(|s| !s) {
        Some(position) => Err(IndexError::inconsistent(
            position,
            format!("missing from the index, record holds {:?}", actual[position]),
        )),
        None => Ok(()),
    }
}
