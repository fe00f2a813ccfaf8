// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Name index: per-name chains of time-ordered bindings.
//!
//! A binding associates a name with an object slot over a span of transaction
//! time. Drops append deleted bindings rather than erasing history, so older
//! snapshots keep resolving the name; a name may be re-bound to a new slot
//! after a visible deletion (drop-then-recreate).

use crate::interface::CatalogTransaction;
use crate::version::SlotId;
use crate::visibility::visible_to;
use quarry_core::TransactionId;
use std::collections::HashMap;

/// One node of a name's binding chain, newest first through owned `prev`
/// links. At most one binding in a chain is visible to any transaction.
#[derive(Debug)]
pub(crate) struct Binding {
    pub(crate) slot: SlotId,
    pub(crate) created: TransactionId,
    pub(crate) deleted: bool,
    prev: Option<Box<Binding>>,
}

impl Binding {
    pub(crate) fn new(slot: SlotId, created: TransactionId, deleted: bool) -> Self {
        Self { slot, created, deleted, prev: None }
    }
}

impl Drop for Binding {
    // Frees the chain iteratively; the compiler-generated recursive drop
    // would overflow the stack on a long history.
    fn drop(&mut self) {
        let mut prev = self.prev.take();
        while let Some(mut node) = prev {
            prev = node.prev.take();
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct NameIndex {
    chains: HashMap<String, Binding>,
}

impl NameIndex {
    /// Newest binding for `name` regardless of visibility.
    pub(crate) fn head(&self, name: &str) -> Option<&Binding> {
        self.chains.get(name)
    }

    /// First binding of `name`'s chain visible to `txn`, walking newest to
    /// oldest. A visible deleted binding is returned as-is: once a deletion
    /// is part of the caller's view, older live bindings below it are
    /// permanently superseded.
    pub(crate) fn resolve(&self, txn: &impl CatalogTransaction, name: &str) -> Option<&Binding> {
        let mut current = self.chains.get(name);
        while let Some(binding) = current {
            if visible_to(txn, binding.created) {
                return Some(binding);
            }
            current = binding.prev.as_deref();
        }
        None
    }

    /// Prepends `binding` as the new chain head for `name`.
    pub(crate) fn push(&mut self, name: &str, mut binding: Binding) {
        binding.prev = self.chains.remove(name).map(Box::new);
        self.chains.insert(name.to_string(), binding);
    }

    /// Splices out the chain head for `name`, restoring its predecessor. The
    /// chain disappears entirely when the discarded head was the first
    /// binding ever created for the name. Returns the discarded head.
    pub(crate) fn pop(&mut self, name: &str) -> Option<Binding> {
        let mut head = self.chains.remove(name)?;
        if let Some(prev) = head.prev.take() {
            self.chains.insert(name.to_string(), *prev);
        }
        Some(head)
    }

    /// Whether `name` has ever been bound, in any transaction's view.
    pub(crate) fn contains(&self, name: &str) -> bool {
        self.chains.contains_key(name)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&str, &Binding)> {
        self.chains.iter().map(|(name, binding)| (name.as_str(), binding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quarry_core::{TransactionId, Version};

    /// Transaction that sees every commit and owns nothing.
    struct ReadAll;

    impl CatalogTransaction for ReadAll {
        fn id(&self) -> TransactionId {
            u64::MAX
        }

        fn start_version(&self) -> Version {
            u64::MAX
        }

        fn commit_version_of(&self, txn: TransactionId) -> Option<Version> {
            Some(txn)
        }
    }

    #[test]
    fn test_push_orders_newest_first() {
        let mut index = NameIndex::default();
        index.push("t", Binding::new(SlotId(0), 1, false));
        index.push("t", Binding::new(SlotId(1), 2, false));
        assert_eq!(index.head("t").unwrap().slot, SlotId(1));
    }

    #[test]
    fn test_resolve_stops_at_visible_deletion() {
        let mut index = NameIndex::default();
        index.push("t", Binding::new(SlotId(0), 1, false));
        index.push("t", Binding::new(SlotId(0), 2, true));
        let binding = index.resolve(&ReadAll, "t").unwrap();
        assert!(binding.deleted);
    }

    #[test]
    fn test_pop_restores_previous_binding() {
        let mut index = NameIndex::default();
        index.push("t", Binding::new(SlotId(0), 1, false));
        index.push("t", Binding::new(SlotId(0), 2, true));
        let discarded = index.pop("t").unwrap();
        assert!(discarded.deleted);
        assert!(!index.head("t").unwrap().deleted);
    }

    #[test]
    fn test_long_chain_drops_without_overflowing() {
        let mut index = NameIndex::default();
        for created in 0..100_000u64 {
            index.push("t", Binding::new(SlotId(0), created, false));
        }
        drop(index);
    }

    #[test]
    fn test_pop_of_first_binding_clears_name() {
        let mut index = NameIndex::default();
        index.push("t", Binding::new(SlotId(0), 1, false));
        index.pop("t").unwrap();
        assert!(!index.contains("t"));
    }
}
