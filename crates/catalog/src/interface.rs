// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::object::CatalogObject;
use crate::version::SlotId;
use quarry_core::{TransactionId, Version};
use std::collections::HashSet;

/// Upstream collaborator: the transaction manager's view of the calling
/// transaction. The catalog stores creating transaction ids in its chains and
/// resolves their commit state through this trait at read time.
pub trait CatalogTransaction {
    /// Identity of the calling transaction.
    fn id(&self) -> TransactionId;

    /// Snapshot horizon: commits at or below this version are visible.
    fn start_version(&self) -> Version;

    /// Commit version of `txn`, or `None` while it is uncommitted or aborted.
    /// Implementations must report [`quarry_core::SYSTEM_TXN`] as committed
    /// at version 0.
    fn commit_version_of(&self, txn: TransactionId) -> Option<Version>;

    fn is_committed(&self, txn: TransactionId) -> bool {
        self.commit_version_of(txn).is_some()
    }
}

/// Downstream collaborator: tracks inter-object dependencies. Invoked by the
/// catalog inside its critical section so that a cascading drop is atomic.
pub trait DependencyManager: Send + Sync {
    /// Called once per successful create with the dependency set the caller
    /// handed in. The catalog does not interpret the set.
    fn register_dependencies(&self, slot: SlotId, dependencies: &HashSet<SlotId>);

    /// Whether any live object depends on `slot`.
    fn has_dependents(&self, slot: SlotId) -> bool;

    /// Resolves the transitive dependents of `slot` without modifying the
    /// graph. The catalog conflict-checks every returned slot before it
    /// tombstones anything, and a conflict aborts the drop with the edges
    /// intact.
    fn resolve_dependents(&self, slot: SlotId) -> Vec<SlotId>;

    /// Called once per tombstoned slot after the whole drop has succeeded;
    /// edges touching `slot` are no longer needed.
    fn forget(&self, slot: SlotId);
}

/// Null dependency manager: nothing depends on anything.
#[derive(Debug, Default)]
pub struct NoDependencies;

impl DependencyManager for NoDependencies {
    fn register_dependencies(&self, _slot: SlotId, _dependencies: &HashSet<SlotId>) {}

    fn has_dependents(&self, _slot: SlotId) -> bool {
        false
    }

    fn resolve_dependents(&self, _slot: SlotId) -> Vec<SlotId> {
        Vec::new()
    }

    fn forget(&self, _slot: SlotId) {}
}

/// Optional per-catalog generator that materializes built-in objects on first
/// lookup miss, so the namespace does not need pre-population at startup.
/// Generated entries are published under [`quarry_core::SYSTEM_TXN`].
pub trait DefaultGenerator: Send + Sync {
    fn try_generate(&self, name: &str) -> Option<CatalogObject>;
}
