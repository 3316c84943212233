//! Pilot assignment diffing between the snapshot and the working selection.

use std::collections::BTreeSet;

/// Join-table rows to insert and delete for one flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PilotChanges {
    pub added: BTreeSet<u64>,
    pub removed: BTreeSet<u64>,
}

impl PilotChanges {
    /// Members of `selection` missing from `original` are added; members of
    /// `original` missing from `selection` are removed. Pilots in both are
    /// left alone.
    pub fn reconcile(original: &BTreeSet<u64>, selection: &BTreeSet<u64>) -> Self {
        Self {
            added: selection.difference(original).copied().collect(),
            removed: original.difference(selection).copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconcile_touches_only_the_difference() {
        let original = BTreeSet::from([1, 2, 3]);
        let selection = BTreeSet::from([2, 3, 4]);

        let changes = PilotChanges::reconcile(&original, &selection);
        assert_eq!(changes.added, BTreeSet::from([4]));
        assert_eq!(changes.removed, BTreeSet::from([1]));
    }

    #[test]
    fn test_reconcile_new_flight_adds_everything() {
        let changes = PilotChanges::reconcile(&BTreeSet::new(), &BTreeSet::from([5, 6]));
        assert_eq!(changes.added, BTreeSet::from([5, 6]));
        assert!(changes.removed.is_empty());
    }

    #[test]
    fn test_reconcile_unchanged_is_empty() {
        let pilots = BTreeSet::from([7]);
        assert!(PilotChanges::reconcile(&pilots, &pilots).is_empty());
    }
}
