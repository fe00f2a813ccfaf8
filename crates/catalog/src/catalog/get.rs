// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::binding::Binding;
use crate::catalog::{Catalog, CatalogEntry};
use crate::interface::CatalogTransaction;
use crate::version::EntryVersion;
use quarry_core::error::diagnostic::internal::invariant_violation;
use quarry_core::{SYSTEM_TXN, return_error};
use tracing::trace;

impl Catalog {
    /// Resolves `name` to the object visible to `txn`, or `None` when the
    /// name is absent from the transaction's view.
    ///
    /// A miss on a name that has never been bound consults the default
    /// generator first, materializing built-in objects lazily. Generated
    /// entries are published under [`SYSTEM_TXN`] and immediately visible to
    /// everyone; a dropped built-in stays dropped because its binding chain
    /// now exists.
    pub fn get_entry(
        &self,
        txn: &impl CatalogTransaction,
        name: &str,
    ) -> crate::Result<Option<CatalogEntry>> {
        let mut inner = self.inner.lock();

        if let Some(binding) = inner.names.resolve(txn, name) {
            if binding.deleted {
                return Ok(None);
            }
            let slot = binding.slot;
            let Some(head) = inner.slots.head(slot) else {
                return_error!(invariant_violation(format!(
                    "binding for '{}' references missing slot {}",
                    name, slot
                )));
            };
            let Some(version) = head.visible(txn) else {
                return Ok(None);
            };
            if version.is_deleted() {
                return Ok(None);
            }
            trace!(name, %slot, txn = txn.id(), "resolved catalog entry");
            return Ok(Some(CatalogEntry {
                slot,
                name: version.name().to_string(),
                object: version.object().clone(),
            }));
        }

        // Nothing visible. Only a name that was never bound at all may be
        // satisfied by the default generator; an existing chain means the
        // name has real history (possibly a concurrent create) that the
        // generator must not shadow.
        if inner.names.contains(name) {
            return Ok(None);
        }
        let Some(defaults) = self.defaults() else {
            return Ok(None);
        };
        let Some(object) = defaults.try_generate(name) else {
            return Ok(None);
        };

        let version = EntryVersion::new(name, object.clone(), SYSTEM_TXN, false);
        let slot = inner.slots.allocate(version);
        inner.names.push(name, Binding::new(slot, SYSTEM_TXN, false));
        trace!(name, %slot, "materialized default catalog entry");
        Ok(Some(CatalogEntry { slot, name: name.to_string(), object }))
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;
    use crate::interface::DefaultGenerator;
    use crate::object::CatalogObject;
    use crate::test_utils::{TestOracle, table};
    use quarry_core::Type;
    use std::collections::HashSet;

    struct BuiltinTables;

    impl DefaultGenerator for BuiltinTables {
        fn try_generate(&self, name: &str) -> Option<CatalogObject> {
            match name {
                "quarry_tables" => Some(table(&[("name", Type::Utf8)])),
                _ => None,
            }
        }
    }

    #[test]
    fn test_create_then_get_round_trip() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();

        let payload = table(&[("id", Type::Int8)]);
        let slot =
            catalog.create_entry(&txn, "t1", payload.clone(), &HashSet::new()).unwrap();

        let entry = catalog.get_entry(&txn, "t1").unwrap().unwrap();
        assert_eq!(entry.slot, slot);
        assert_eq!(entry.object, payload);
    }

    #[test]
    fn test_get_unknown_name() {
        let catalog = Catalog::new();
        let oracle = TestOracle::new();
        let txn = oracle.begin();
        assert!(catalog.get_entry(&txn, "missing").unwrap().is_none());
    }

    #[test]
    fn test_default_generated_on_miss() {
        let catalog = Catalog::new().with_defaults(Box::new(BuiltinTables));
        let oracle = TestOracle::new();

        let txn = oracle.begin();
        let entry = catalog.get_entry(&txn, "quarry_tables").unwrap().unwrap();
        assert_eq!(entry.name, "quarry_tables");

        // Visible to a concurrent transaction as well: defaults belong to the
        // system, not to the transaction that tripped the generation.
        let other = oracle.begin();
        assert!(catalog.get_entry(&other, "quarry_tables").unwrap().is_some());
    }

    #[test]
    fn test_dropped_default_stays_dropped() {
        let catalog = Catalog::new().with_defaults(Box::new(BuiltinTables));
        let oracle = TestOracle::new();

        let a = oracle.begin();
        catalog.get_entry(&a, "quarry_tables").unwrap().unwrap();
        catalog.drop_entry(&a, "quarry_tables", false).unwrap();
        a.commit();

        let b = oracle.begin();
        assert!(catalog.get_entry(&b, "quarry_tables").unwrap().is_none());
    }
}
