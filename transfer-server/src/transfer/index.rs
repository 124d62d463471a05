//! Per-pattern transfer index.
//!
//! The index answers "which constrained transfers may apply at this stop
//! position?" in O(1). It is a fixed-size array with one slot per stop
//! position of the pattern. Each slot holds a short list of entries ordered
//! most specific first, so the search can take the first match.

use crate::domain::{StopPosition, TransferId};

use super::entry::TransferForPattern;

/// Read-only transfer entries of one pattern, in one search direction.
#[derive(Debug, Clone, Default)]
pub struct TransferIndex {
    slots: Box<[Vec<TransferForPattern>]>,
}

impl TransferIndex {
    /// Check whether any constrained transfer is registered at a position.
    ///
    /// Positions outside the pattern have none.
    pub fn transfer_exist(&self, pos: StopPosition) -> bool {
        self.slots.get(pos.0).is_some_and(|slot| !slot.is_empty())
    }

    /// Returns the entries registered at a position, most specific first.
    pub fn transfers_at(&self, pos: StopPosition) -> &[TransferForPattern] {
        self.slots
            .get(pos.0)
            .map(|slot| slot.as_slice())
            .unwrap_or(&[])
    }

    /// Returns the number of stop positions covered.
    pub fn stop_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the total number of entries.
    pub fn len(&self) -> usize {
        self.slots.iter().map(|slot| slot.len()).sum()
    }

    /// Returns true if no entries are registered at any position.
    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|slot| slot.is_empty())
    }
}

/// Outcome of registering an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Registration {
    Added,
    /// The same transfer already registered an entry with the same keys.
    Duplicate,
    /// Another transfer already registered an entry with the same keys;
    /// that entry is kept.
    Conflict { kept: TransferId },
    /// The position is outside the pattern.
    OutOfRange,
}

/// Mutable form of the index, used only while generating.
#[derive(Debug)]
pub(crate) struct TransferIndexBuilder {
    slots: Vec<Vec<TransferForPattern>>,
}

impl TransferIndexBuilder {
    pub(crate) fn new(stop_count: usize) -> Self {
        Self {
            slots: vec![Vec::new(); stop_count],
        }
    }

    /// Register an entry at a position.
    ///
    /// Entries are kept ordered by source specificity, then target
    /// specificity, both descending. Entries of equal rank keep
    /// registration order, so the first registered wins ties.
    pub(crate) fn add(&mut self, pos: StopPosition, entry: TransferForPattern) -> Registration {
        let Some(slot) = self.slots.get_mut(pos.0) else {
            return Registration::OutOfRange;
        };

        if let Some(existing) = slot.iter().find(|e| e.same_keys(&entry)) {
            return if existing.transfer_id() == entry.transfer_id() {
                Registration::Duplicate
            } else {
                Registration::Conflict {
                    kept: existing.transfer_id().clone(),
                }
            };
        }

        let rank = entry.rank();
        let at = slot
            .iter()
            .position(|e| e.rank() < rank)
            .unwrap_or(slot.len());
        slot.insert(at, entry);
        Registration::Added
    }

    pub(crate) fn build(self) -> TransferIndex {
        TransferIndex {
            slots: self.slots.into_boxed_slice(),
        }
    }
}
