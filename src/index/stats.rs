//! Passive index statistics

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Point-in-time view of an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Index name from its config
    pub name: String,
    /// Number of distinct values
    pub key_count: usize,
    /// Number of positions across all entries
    pub position_count: usize,
    /// Completed `put` calls
    pub puts: u64,
    /// Completed `rm` calls that found their entry
    pub removals: u64,
    /// Full rebuilds, including the initial one
    pub rebuilds: u64,
    /// Rebuilds triggered by `rm` missing its entry
    pub heals: u64,
}

/// Monotonic counters updated while the index lock is held.
#[derive(Debug, Default)]
pub(crate) struct Counters {
    puts: AtomicU64,
    removals: AtomicU64,
    rebuilds: AtomicU64,
    heals: AtomicU64,
}

impl Counters {
    pub(crate) fn record_put(&self) {
        self.puts.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_removal(&self) {
        self.removals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_rebuild(&self) {
        self.rebuilds.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_heal(&self) {
        self.heals.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, name: &str, key_count: usize, position_count: usize) -> IndexStats {
        IndexStats {
            name: name.to_string(),
            key_count,
            position_count,
            puts: self.puts.load(Ordering::Relaxed),
            removals: self.removals.load(Ordering::Relaxed),
            rebuilds: self.rebuilds.load(Ordering::Relaxed),
            heals: self.heals.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_counters() {
        let counters = Counters::default();
        counters.record_put();
        counters.record_put();
        counters.record_removal();
        counters.record_rebuild();
        counters.record_heal();

        let stats = counters.snapshot("by_key", 4, 9);
        assert_eq!(stats.name, "by_key");
        assert_eq!(stats.key_count, 4);
        assert_eq!(stats.position_count, 9);
        assert_eq!(stats.puts, 2);
        assert_eq!(stats.removals, 1);
        assert_eq!(stats.rebuilds, 1);
        assert_eq!(stats.heals, 1);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = Counters::default().snapshot("i", 0, 0);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["name"], "i");
        assert_eq!(json["rebuilds"], 0);
    }
}
