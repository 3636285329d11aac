//! Index entries: the base-array positions holding one indexed value

/// Position of a record in the base array.
///
/// Positions are slots, not identities: swap-delete compaction moves records
/// between positions.
pub type Position = usize;

/// Every position currently holding one indexed value.
///
/// The value itself is the entry's key in the index tree. The position list
/// is a multiset with no meaningful order. An entry is never left in the
/// tree with an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    positions: Vec<Position>,
}

impl IndexEntry {
    /// Create an entry holding a single position
    pub fn new(position: Position) -> Self {
        Self {
            positions: vec![position],
        }
    }

    /// Positions holding the value, in insertion/swap order
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no position is left
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Record another position for this value
    pub fn push(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Drop every occurrence of `position`
    pub fn remove(&mut self, position: Position) {
        let positions = std::mem::take(&mut self.positions);
        self.positions = remove_position(positions, position);
    }

    /// Copy the positions out, sorted ascending when asked
    pub(crate) fn extend_into(&self, out: &mut Vec<Position>, sorted: bool) {
        let start = out.len();
        out.extend_from_slice(&self.positions);
        if sorted {
            out[start..].sort_unstable();
        }
    }
}

/// Remove every occurrence of `value` from a position list.
///
/// Each match is overwritten with the current last element and the list
/// shrinks by one, so the relative order of the survivors is not kept.
/// Duplicates are all removed. A missing value leaves the list untouched.
pub fn remove_position(mut positions: Vec<Position>, value: Position) -> Vec<Position> {
    let mut i = 0;
    while i < positions.len() {
        if positions[i] == value {
            positions.swap_remove(i);
        } else {
            i += 1;
        }
    }
    positions
}
