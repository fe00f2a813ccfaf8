// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use crate::binding::NameIndex;
use crate::interface::{CatalogTransaction, DefaultGenerator, DependencyManager, NoDependencies};
use crate::object::CatalogObject;
use crate::similarity::{levenshtein, within_threshold};
use crate::version::{EntryVersion, SlotId, SlotTable};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

mod alter;
mod create;
mod drop;
mod get;
mod undo;

/// Owned snapshot of one catalog object, cloned out under the catalog lock.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub slot: SlotId,
    pub name: String,
    pub object: CatalogObject,
}

/// Names one write a transaction performed against a catalog, for the
/// transaction manager's undo log. Rollback hands these back to
/// [`Catalog::undo`] in reverse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogWrite {
    /// The newest binding of this name.
    Binding(String),
    /// The newest version of this slot's chain.
    Version(SlotId),
}

pub(crate) struct CatalogInner {
    pub(crate) names: NameIndex,
    pub(crate) slots: SlotTable,
}

/// A transactional object catalog: the name index and object store behind one
/// exclusive lock. All operations are short, in-memory and lock-bounded;
/// conflicting writers fail fast instead of waiting.
pub struct Catalog {
    pub(crate) inner: Mutex<CatalogInner>,
    pub(crate) dependencies: Box<dyn DependencyManager>,
    defaults: Option<Box<dyn DefaultGenerator>>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CatalogInner { names: NameIndex::default(), slots: SlotTable::default() }),
            dependencies: Box::new(NoDependencies),
            defaults: None,
        }
    }

    /// Replaces the dependency manager. Intended for construction time, before
    /// the catalog is shared.
    pub fn with_dependencies(mut self, dependencies: Box<dyn DependencyManager>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Installs a generator for lazily materialized built-in objects.
    pub fn with_defaults(mut self, defaults: Box<dyn DefaultGenerator>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    pub(crate) fn defaults(&self) -> Option<&dyn DefaultGenerator> {
        self.defaults.as_deref()
    }

    /// Scans the catalog under a consistent snapshot: the lock is held for the
    /// whole traversal and `visitor` runs once per live object visible to
    /// `txn`.
    pub fn scan(
        &self,
        txn: &impl CatalogTransaction,
        mut visitor: impl FnMut(SlotId, &EntryVersion),
    ) {
        let inner = self.inner.lock();
        for (name, _) in inner.names.iter() {
            let Some(binding) = inner.names.resolve(txn, name) else {
                continue;
            };
            if binding.deleted {
                continue;
            }
            let Some(head) = inner.slots.head(binding.slot) else {
                continue;
            };
            if let Some(version) = head.visible(txn) {
                if !version.is_deleted() {
                    visitor(binding.slot, version);
                }
            }
        }
    }

    /// Returns the live, visible name most similar to `name`, or `None` when
    /// nothing is within the suggestion threshold. Diagnostic aid only.
    pub fn similar_entry(&self, txn: &impl CatalogTransaction, name: &str) -> Option<String> {
        let inner = self.inner.lock();
        let mut best: Option<(usize, &str)> = None;
        for (candidate, _) in inner.names.iter() {
            let Some(binding) = inner.names.resolve(txn, candidate) else {
                continue;
            };
            if binding.deleted {
                continue;
            }
            let distance = levenshtein(name, candidate);
            // Ties resolve to the lexicographically smaller name so the
            // suggestion is deterministic across map iteration orders.
            let better = match best {
                None => true,
                Some((best_distance, best_name)) => {
                    (distance, candidate) < (best_distance, best_name)
                }
            };
            if better {
                best = Some((distance, candidate));
            }
        }
        match best {
            Some((distance, candidate)) if within_threshold(name, distance) => {
                Some(candidate.to_string())
            }
            _ => None,
        }
    }

    /// Newest head version for `name` regardless of any transaction's
    /// snapshot, including tombstones. For collaborators that serialize
    /// access externally.
    pub fn root_entry(&self, name: &str) -> Option<CatalogEntry> {
        let inner = self.inner.lock();
        let binding = inner.names.head(name)?;
        let head = inner.slots.head(binding.slot)?;
        Some(CatalogEntry {
            slot: binding.slot,
            name: head.name().to_string(),
            object: head.object().clone(),
        })
    }

    /// Current head version of `slot` regardless of any transaction's
    /// snapshot. The stable-handle counterpart of [`Catalog::root_entry`].
    pub fn entry_from_slot(&self, slot: SlotId) -> Option<CatalogEntry> {
        let inner = self.inner.lock();
        let head = inner.slots.head(slot)?;
        Some(CatalogEntry { slot, name: head.name().to_string(), object: head.object().clone() })
    }
}
