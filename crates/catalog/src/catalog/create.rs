// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::binding::Binding;
use crate::catalog::Catalog;
use crate::interface::CatalogTransaction;
use crate::object::CatalogObject;
use crate::version::{EntryVersion, SlotId};
use crate::visibility::visible_to;
use quarry_core::error::diagnostic::catalog::entry_already_exists;
use quarry_core::error::diagnostic::transaction::transaction_conflict;
use quarry_core::return_error;
use std::collections::HashSet;
use tracing::debug;

impl Catalog {
    /// Creates a new catalog entry under `name`, owned by `txn` until it
    /// commits. Returns the freshly assigned slot.
    ///
    /// Names must be unique among bindings that are live from the writer's
    /// point of view. A newest binding the writer cannot see blocks the
    /// create as well: a live one means the name is (or will be) taken by a
    /// committed or concurrent transaction; a deleted one means a concurrent
    /// drop is still in flight and the outcome of the race is undecided.
    ///
    /// The dependency set is handed to the dependency manager untouched.
    pub fn create_entry(
        &self,
        txn: &impl CatalogTransaction,
        name: &str,
        object: CatalogObject,
        dependencies: &HashSet<SlotId>,
    ) -> crate::Result<SlotId> {
        let mut inner = self.inner.lock();

        if let Some(head) = inner.names.head(name) {
            if visible_to(txn, head.created) {
                if !head.deleted {
                    return_error!(entry_already_exists(name));
                }
                // Visible deletion: the name may be re-bound to a new slot.
            } else if !head.deleted {
                return_error!(entry_already_exists(name));
            } else {
                return_error!(transaction_conflict(name));
            }
        }

        let version = EntryVersion::new(name, object, txn.id(), false);
        let slot = inner.slots.allocate(version);
        inner.names.push(name, Binding::new(slot, txn.id(), false));

        // Registered inside the critical section so a concurrent cascading
        // drop cannot interleave between the splice and the registration.
        self.dependencies.register_dependencies(slot, dependencies);

        debug!(name, %slot, txn = txn.id(), "created catalog entry");
        Ok(slot)
    }
}
