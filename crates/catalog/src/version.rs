// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Object store: a slot table mapping stable integer slots to the head of an
//! object's version chain.

use crate::interface::CatalogTransaction;
use crate::object::CatalogObject;
use crate::visibility::visible_to;
use quarry_core::TransactionId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};

/// Stable integer identity of a catalog object across its version history.
/// Collaborators hold slots where they need a handle that survives alters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub u64);

impl Display for SlotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}

/// One immutable-once-published snapshot of a catalog object. Versions form a
/// newest-first singly linked chain through owned `prev` links; the slot
/// table holds the head.
#[derive(Debug)]
pub struct EntryVersion {
    name: String,
    object: CatalogObject,
    created: TransactionId,
    deleted: bool,
    prev: Option<Box<EntryVersion>>,
}

impl EntryVersion {
    pub(crate) fn new(
        name: impl Into<String>,
        object: CatalogObject,
        created: TransactionId,
        deleted: bool,
    ) -> Self {
        Self { name: name.into(), object, created, deleted, prev: None }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn object(&self) -> &CatalogObject {
        &self.object
    }

    pub fn created(&self) -> TransactionId {
        self.created
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Walks the chain newest-to-oldest and returns the first version visible
    /// to `txn`, deleted or not. Callers decide how to treat a visible
    /// tombstone.
    pub(crate) fn visible(&self, txn: &impl CatalogTransaction) -> Option<&EntryVersion> {
        let mut current = Some(self);
        while let Some(version) = current {
            if visible_to(txn, version.created) {
                return Some(version);
            }
            current = version.prev.as_deref();
        }
        None
    }
}

impl Drop for EntryVersion {
    // Frees the chain iteratively; the compiler-generated recursive drop
    // would overflow the stack on a long history.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(mut node) = prev {
            prev = node.prev.take();
        }
    }
}

/// The slot table. Slots are assigned from a monotonically increasing counter
/// and removed only when an undo discards the last version of a chain.
#[derive(Debug, Default)]
pub(crate) struct SlotTable {
    slots: HashMap<SlotId, EntryVersion>,
    next_slot: u64,
}

impl SlotTable {
    /// Assigns a fresh slot for the first version of a new object.
    pub(crate) fn allocate(&mut self, version: EntryVersion) -> SlotId {
        let slot = SlotId(self.next_slot);
        self.next_slot += 1;
        self.slots.insert(slot, version);
        slot
    }

    pub(crate) fn head(&self, slot: SlotId) -> Option<&EntryVersion> {
        self.slots.get(&slot)
    }

    /// Links `version` as the new head of `slot`, with `prev` pointing at the
    /// old head. The old head stays reachable for snapshots that need it.
    pub(crate) fn push(&mut self, slot: SlotId, mut version: EntryVersion) {
        let old = self.slots.remove(&slot);
        debug_assert!(old.is_some(), "push onto unknown slot {}", slot);
        version.prev = old.map(Box::new);
        self.slots.insert(slot, version);
    }

    /// Splices out the head of `slot`, restoring its predecessor. When the
    /// discarded head was the original creation, the slot is removed
    /// entirely. Returns the discarded head.
    pub(crate) fn pop(&mut self, slot: SlotId) -> Option<EntryVersion> {
        let mut head = self.slots.remove(&slot)?;
        if let Some(prev) = head.prev.take() {
            self.slots.insert(slot, *prev);
        }
        Some(head)
    }
}
