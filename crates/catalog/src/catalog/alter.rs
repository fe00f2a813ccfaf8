// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::catalog::Catalog;
use crate::interface::CatalogTransaction;
use crate::object::Alteration;
use crate::version::{EntryVersion, SlotId};
use crate::visibility::conflicts_with;
use quarry_core::error::diagnostic::catalog::entry_not_found;
use quarry_core::error::diagnostic::internal::invariant_violation;
use quarry_core::error::diagnostic::transaction::transaction_conflict;
use quarry_core::return_error;
use tracing::debug;

impl Catalog {
    /// Applies `alteration` to the version of `name` visible to `txn` and
    /// links the result as the new chain head. The old head remains reachable
    /// for snapshots that still need it.
    pub fn alter_entry(
        &self,
        txn: &impl CatalogTransaction,
        name: &str,
        alteration: &Alteration,
    ) -> crate::Result<SlotId> {
        let mut inner = self.inner.lock();

        let Some(binding) = inner.names.resolve(txn, name) else {
            return_error!(entry_not_found(name));
        };
        if binding.deleted {
            return_error!(entry_not_found(name));
        }
        let slot = binding.slot;

        let Some(head) = inner.slots.head(slot) else {
            return_error!(invariant_violation(format!(
                "binding for '{}' references missing slot {}",
                name, slot
            )));
        };
        if conflicts_with(txn, head.created()) {
            return_error!(transaction_conflict(name));
        }
        // Past the conflict check the head is the visible version: anything
        // newer than the caller's snapshot would have conflicted.
        if head.is_deleted() {
            return_error!(entry_not_found(name));
        }

        let altered = head.object().apply(name, alteration)?;
        inner.slots.push(slot, EntryVersion::new(name, altered, txn.id(), false));

        debug!(name, %slot, txn = txn.id(), "altered catalog entry");
        Ok(slot)
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::object::{Alteration, CatalogObject, ColumnDef};
    use crate::test_utils::{TestOracle, table};
    use quarry_core::Type;
    use std::collections::HashSet;

    fn add_age() -> Alteration {
        Alteration::AddColumn(ColumnDef::new("age", Type::Int4))
    }

    #[test]
    fn test_alter_appends_new_version() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();

        catalog.create_entry(&txn, "t", table(&[("id", Type::Int8)]), &HashSet::new()).unwrap();
        catalog.alter_entry(&txn, "t", &add_age()).unwrap();

        let entry = catalog.get_entry(&txn, "t").unwrap().unwrap();
        let CatalogObject::Table(def) = entry.object else { panic!() };
        assert_eq!(def.columns.len(), 2);
    }

    #[test]
    fn test_alter_unknown_name() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();
        let err = catalog.alter_entry(&txn, "missing", &add_age()).unwrap_err();
        assert_eq!(err.diagnostic().code, "CA_002");
    }

    #[test]
    fn test_alter_races_uncommitted_alter() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();

        let a = oracle.begin();
        catalog.create_entry(&a, "t", table(&[("id", Type::Int8)]), &HashSet::new()).unwrap();
        a.commit();

        let b = oracle.begin();
        let c = oracle.begin();
        catalog.alter_entry(&b, "t", &add_age()).unwrap();

        let err = catalog.alter_entry(&c, "t", &add_age()).unwrap_err();
        assert_eq!(err.diagnostic().code, "TXN_001");
    }

    #[test]
    fn test_alter_after_concurrent_commit_conflicts() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();

        let a = oracle.begin();
        catalog.create_entry(&a, "t", table(&[("id", Type::Int8)]), &HashSet::new()).unwrap();
        a.commit();

        // c snapshots before b commits its alter; writing over b's committed
        // head would lose b's change.
        let b = oracle.begin();
        let c = oracle.begin();
        catalog.alter_entry(&b, "t", &add_age()).unwrap();
        b.commit();

        let err = catalog.alter_entry(&c, "t", &add_age()).unwrap_err();
        assert_eq!(err.diagnostic().code, "TXN_001");
    }

    #[test]
    fn test_old_version_stays_reachable() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();

        let a = oracle.begin();
        catalog.create_entry(&a, "t", table(&[("id", Type::Int8)]), &HashSet::new()).unwrap();
        a.commit();

        let reader = oracle.begin();

        let b = oracle.begin();
        catalog.alter_entry(&b, "t", &add_age()).unwrap();
        b.commit();

        // The reader's snapshot predates the alter.
        let entry = catalog.get_entry(&reader, "t").unwrap().unwrap();
        let CatalogObject::Table(def) = entry.object else { panic!() };
        assert_eq!(def.columns.len(), 1);
    }
}
