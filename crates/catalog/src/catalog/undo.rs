// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::catalog::{Catalog, CatalogWrite};
use crate::interface::CatalogTransaction;
use tracing::trace;

impl Catalog {
    /// Splices out one write of a rolling-back transaction, rewinding the
    /// named chain to its predecessor.
    ///
    /// Only a chain head created by `txn` itself while still uncommitted is
    /// discarded; such a node cannot be the base of anyone else's snapshot
    /// yet. Anything else is a no-op, which makes undo idempotent and safe to
    /// replay.
    pub fn undo(&self, txn: &impl CatalogTransaction, write: &CatalogWrite) {
        if txn.is_committed(txn.id()) {
            return;
        }
        let mut inner = self.inner.lock();
        match write {
            CatalogWrite::Binding(name) => {
                let owned = inner
                    .names
                    .head(name)
                    .is_some_and(|head| head.created == txn.id());
                if owned {
                    inner.names.pop(name);
                    trace!(name, txn = txn.id(), "undid binding");
                }
            }
            CatalogWrite::Version(slot) => {
                let owned = inner
                    .slots
                    .head(*slot)
                    .is_some_and(|head| head.created() == txn.id());
                if owned {
                    inner.slots.pop(*slot);
                    trace!(%slot, txn = txn.id(), "undid version");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::{Catalog, CatalogWrite};
    use crate::test_utils::{TestOracle, table};
    use std::collections::HashSet;

    #[test]
    fn test_undo_create_removes_entry() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();

        let slot = catalog.create_entry(&txn, "t", table(&[]), &HashSet::new()).unwrap();
        catalog.undo(&txn, &CatalogWrite::Version(slot));
        catalog.undo(&txn, &CatalogWrite::Binding("t".to_string()));

        assert!(catalog.get_entry(&txn, "t").unwrap().is_none());
        assert!(catalog.entry_from_slot(slot).is_none());
    }

    #[test]
    fn test_undo_is_idempotent() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();

        let slot = catalog.create_entry(&txn, "t", table(&[]), &HashSet::new()).unwrap();
        catalog.undo(&txn, &CatalogWrite::Version(slot));
        catalog.undo(&txn, &CatalogWrite::Version(slot));
        catalog.undo(&txn, &CatalogWrite::Binding("t".to_string()));
        catalog.undo(&txn, &CatalogWrite::Binding("t".to_string()));

        assert!(catalog.get_entry(&txn, "t").unwrap().is_none());
    }

    #[test]
    fn test_undo_ignores_foreign_heads() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();

        let a = oracle.begin();
        let slot = catalog.create_entry(&a, "t", table(&[]), &HashSet::new()).unwrap();
        a.commit();

        let b = oracle.begin();
        catalog.undo(&b, &CatalogWrite::Version(slot));
        catalog.undo(&b, &CatalogWrite::Binding("t".to_string()));

        assert!(catalog.get_entry(&b, "t").unwrap().is_some());
    }

    #[test]
    fn test_undo_after_commit_is_a_no_op() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();

        let a = oracle.begin();
        let slot = catalog.create_entry(&a, "t", table(&[]), &HashSet::new()).unwrap();
        a.commit();

        catalog.undo(&a, &CatalogWrite::Version(slot));
        catalog.undo(&a, &CatalogWrite::Binding("t".to_string()));

        let reader = oracle.begin();
        assert!(catalog.get_entry(&reader, "t").unwrap().is_some());
    }
}
