//! Row-level diff between two data tables.
//!
//! Rows are keyed by the declared identity dimension when both tables
//! have one. Without identity, old row `i` pairs with new row `i`
//! positionally. The positional pairing is deliberate compatibility
//! behavior: it produces confusing update animations when rows are
//! reordered without ids, but it keeps wholesale table replacement
//! cheap and predictable.

use ahash::AHashMap;
use tracing::debug;

use crate::table::DataTable;

/// Result of diffing a new table against an old one.
///
/// Index spaces differ per list: `added` holds new-table indices,
/// `removed` holds old-table indices, `updated` holds `(new, old)`
/// pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableDiff {
    pub added: Vec<usize>,
    pub updated: Vec<(usize, usize)>,
    pub removed: Vec<usize>,
}

impl TableDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.updated.is_empty() && self.removed.is_empty()
    }

    /// Visit the diff in consumption order: adds, then updates, then
    /// removals.
    pub fn execute<A, U, R>(&self, mut add: A, mut update: U, mut remove: R)
    where
        A: FnMut(usize),
        U: FnMut(usize, usize),
        R: FnMut(usize),
    {
        for &new_idx in &self.added {
            add(new_idx);
        }
        for &(new_idx, old_idx) in &self.updated {
            update(new_idx, old_idx);
        }
        for &old_idx in &self.removed {
            remove(old_idx);
        }
    }
}

impl DataTable {
    /// Diff this (new) table against `old`. A first render
    /// (`old == None`) adds every row.
    pub fn diff(&self, old: Option<&DataTable>) -> TableDiff {
        let old = match old {
            Some(old) => old,
            None => {
                return TableDiff {
                    added: (0..self.count()).collect(),
                    ..Default::default()
                }
            }
        };

        let keyed = self.identity_dimension().is_some() && old.identity_dimension().is_some();
        let diff = if keyed {
            self.diff_by_identity(old)
        } else {
            self.diff_positional(old)
        };

        debug!(
            added = diff.added.len(),
            updated = diff.updated.len(),
            removed = diff.removed.len(),
            keyed,
            "table diff"
        );
        diff
    }

    fn diff_by_identity(&self, old: &DataTable) -> TableDiff {
        let mut old_by_id: AHashMap<String, usize> = AHashMap::with_capacity(old.count());
        // First occurrence wins for duplicate ids.
        for old_idx in (0..old.count()).rev() {
            if let Some(id) = old.identity(old_idx) {
                old_by_id.insert(id, old_idx);
            }
        }

        let mut diff = TableDiff::default();
        let mut consumed = vec![false; old.count()];

        for new_idx in 0..self.count() {
            let matched = self
                .identity(new_idx)
                .and_then(|id| old_by_id.remove(&id));
            match matched {
                Some(old_idx) => {
                    consumed[old_idx] = true;
                    diff.updated.push((new_idx, old_idx));
                }
                None => diff.added.push(new_idx),
            }
        }

        for (old_idx, used) in consumed.iter().enumerate() {
            if !used {
                diff.removed.push(old_idx);
            }
        }
        diff
    }

    fn diff_positional(&self, old: &DataTable) -> TableDiff {
        let shared = self.count().min(old.count());
        TableDiff {
            updated: (0..shared).map(|i| (i, i)).collect(),
            added: (shared..self.count()).collect(),
            removed: (shared..old.count()).collect(),
        }
    }
}
