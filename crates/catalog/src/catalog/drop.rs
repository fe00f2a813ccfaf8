// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::binding::Binding;
use crate::catalog::{Catalog, CatalogInner};
use crate::interface::CatalogTransaction;
use crate::version::{EntryVersion, SlotId};
use crate::visibility::conflicts_with;
use quarry_core::error::diagnostic::catalog::{entry_in_use, entry_not_found};
use quarry_core::error::diagnostic::internal::invariant_violation;
use quarry_core::error::diagnostic::transaction::transaction_conflict;
use quarry_core::return_error;
use tracing::debug;

impl Catalog {
    /// Drops the entry visible to `txn` under `name`. History is preserved: a
    /// deleted version is appended to the slot chain and a deleted binding to
    /// the name chain, so older snapshots keep resolving the object.
    ///
    /// With `cascade`, the dependency manager resolves the transitive
    /// dependents and every one of them is tombstoned in the same critical
    /// section; a conflicting dependent aborts the whole cascade before
    /// anything is touched. Without `cascade`, live dependents block the
    /// drop.
    ///
    /// Returns every slot that was tombstoned, the named entry first.
    pub fn drop_entry(
        &self,
        txn: &impl CatalogTransaction,
        name: &str,
        cascade: bool,
    ) -> crate::Result<Vec<SlotId>> {
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
        if head.is_deleted() {
            return_error!(entry_not_found(name));
        }

        let mut to_drop = vec![slot];
        if cascade {
            for dependent in self.dependencies.resolve_dependents(slot) {
                if !to_drop.contains(&dependent) {
                    to_drop.push(dependent);
                }
            }
        } else if self.dependencies.has_dependents(slot) {
            return_error!(entry_in_use(name));
        }

        // Verify the whole cascade before touching anything: a dependent held
        // by a concurrent writer aborts the drop with nothing tombstoned.
        for &dependent in &to_drop[1..] {
            let Some(dependent_head) = inner.slots.head(dependent) else {
                return_error!(invariant_violation(format!(
                    "cascade of '{}' references missing slot {}",
                    name, dependent
                )));
            };
            if conflicts_with(txn, dependent_head.created()) {
                return_error!(transaction_conflict(dependent_head.name()));
            }
        }
        // A dependent the transaction already dropped is tombstoned once.
        to_drop.retain(|&candidate| {
            inner.slots.head(candidate).is_some_and(|head| !head.is_deleted())
        });

        for &candidate in &to_drop {
            tombstone(&mut inner, txn, candidate)?;
        }
        // Dependency edges are discarded only once every tombstone has landed;
        // an aborted cascade leaves the graph untouched.
        for &candidate in &to_drop {
            self.dependencies.forget(candidate);
        }

        debug!(name, ?to_drop, txn = txn.id(), cascade, "dropped catalog entry");
        Ok(to_drop)
    }
}

/// Appends the two tombstones for `slot`: a deleted version on its chain and
/// a deleted binding on its name's chain. Caller holds the catalog lock and
/// has already conflict-checked the head.
fn tombstone(
    inner: &mut CatalogInner,
    txn: &impl CatalogTransaction,
    slot: SlotId,
) -> crate::Result<()> {
    let (name, object) = {
        let Some(head) = inner.slots.head(slot) else {
            return_error!(invariant_violation(format!("tombstone of missing slot {}", slot)));
        };
        (head.name().to_string(), head.object().clone())
    };
    inner.slots.push(slot, EntryVersion::new(&name, object, txn.id(), true));
    inner.names.push(&name, Binding::new(slot, txn.id(), true));
    Ok(())
}
