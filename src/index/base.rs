//! Access to the caller-owned base array
//!
//! The index never owns records. It holds a `BaseArray` handle and reads it
//! only while rebuilding or auditing.

use parking_lot::RwLock;

use super::entry::Position;

/// Read access to a position-addressed record collection.
pub trait BaseArray<R>: Send + Sync {
    /// Number of valid positions
    fn len(&self) -> usize;

    /// Whether the array holds no records
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit every record in position order.
    ///
    /// The visit happens under whatever guard the implementation needs; the
    /// callback must not try to mutate the array.
    fn scan(&self, visit: &mut dyn FnMut(Position, &R));
}

/// A base array shared behind a `parking_lot::RwLock`.
///
/// Scans use `read_recursive` so a caller already holding a read guard on the
/// array can call into the index without deadlocking against a queued writer.
impl<R: Send + Sync> BaseArray<R> for RwLock<Vec<R>> {
    fn len(&self) -> usize {
        self.read_recursive().len()
    }

    fn scan(&self, visit: &mut dyn FnMut(Position, &R)) {
        let records = self.read_recursive();
        for (position, record) in records.iter().enumerate() {
            visit(position, record);
        }
    }
}

/// An immutable base array
impl<R: Send + Sync> BaseArray<R> for Vec<R> {
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn scan(&self, visit: &mut dyn FnMut(Position, &R)) {
        for (position, record) in self.iter().enumerate() {
            visit(position, record);
        }
    }
}
