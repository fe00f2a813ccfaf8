// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Test transaction oracle: a minimal stand-in for the transaction manager,
//! allocating transaction ids and commit versions and keeping the undo log
//! that rollback replays through [`Catalog::undo`].

use crate::catalog::{Catalog, CatalogWrite};
use crate::interface::CatalogTransaction;
use crate::object::{Alteration, CatalogObject, ColumnDef, TableDef};
use crate::version::SlotId;
use parking_lot::Mutex;
use quarry_core::{SYSTEM_TXN, TransactionId, Type, Version};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Allocates transaction identities and commit versions. A transaction's
/// start version is the newest commit version at begin time.
pub struct TestOracle {
    next_txn: AtomicU64,
    clock: AtomicU64,
    commits: Mutex<HashMap<TransactionId, Version>>,
}

impl TestOracle {
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> Arc<TestOracle> {
        Arc::new(TestOracle {
            next_txn: AtomicU64::new(SYSTEM_TXN + 1),
            clock: AtomicU64::new(0),
            commits: Mutex::new(HashMap::new()),
        })
    }

    pub fn begin(self: &Arc<Self>) -> TestTransaction {
        TestTransaction {
            id: self.next_txn.fetch_add(1, Ordering::SeqCst),
            start: self.clock.load(Ordering::SeqCst),
            oracle: Arc::clone(self),
            writes: Mutex::new(Vec::new()),
        }
    }
}

pub struct TestTransaction {
    id: TransactionId,
    start: Version,
    oracle: Arc<TestOracle>,
    writes: Mutex<Vec<CatalogWrite>>,
}

impl CatalogTransaction for TestTransaction {
    fn id(&self) -> TransactionId {
        self.id
    }

    fn start_version(&self) -> Version {
        self.start
    }

    fn commit_version_of(&self, txn: TransactionId) -> Option<Version> {
        if txn == SYSTEM_TXN {
            return Some(0);
        }
        self.oracle.commits.lock().get(&txn).copied()
    }
}

impl TestTransaction {
    /// Commits: allocates the next commit version and publishes it.
    pub fn commit(&self) {
        let version = self.oracle.clock.fetch_add(1, Ordering::SeqCst) + 1;
        self.oracle.commits.lock().insert(self.id, version);
    }

    /// Rolls back by replaying the undo log in reverse.
    pub fn rollback(&self, catalog: &Catalog) {
        let writes = std::mem::take(&mut *self.writes.lock());
        for write in writes.iter().rev() {
            catalog.undo(self, write);
        }
    }

    pub fn create_entry(
        &self,
        catalog: &Catalog,
        name: &str,
        object: CatalogObject,
    ) -> crate::Result<SlotId> {
        self.create_entry_with(catalog, name, object, &HashSet::new())
    }

    pub fn create_entry_with(
        &self,
        catalog: &Catalog,
        name: &str,
        object: CatalogObject,
        dependencies: &HashSet<SlotId>,
    ) -> crate::Result<SlotId> {
        let slot = catalog.create_entry(self, name, object, dependencies)?;
        let mut writes = self.writes.lock();
        writes.push(CatalogWrite::Version(slot));
        writes.push(CatalogWrite::Binding(name.to_string()));
        Ok(slot)
    }

    pub fn alter_entry(
        &self,
        catalog: &Catalog,
        name: &str,
        alteration: &Alteration,
    ) -> crate::Result<SlotId> {
        let slot = catalog.alter_entry(self, name, alteration)?;
        self.writes.lock().push(CatalogWrite::Version(slot));
        Ok(slot)
    }

    pub fn drop_entry(
        &self,
        catalog: &Catalog,
        name: &str,
        cascade: bool,
    ) -> crate::Result<Vec<SlotId>> {
        let dropped = catalog.drop_entry(self, name, cascade)?;
        let mut writes = self.writes.lock();
        for &slot in &dropped {
            writes.push(CatalogWrite::Version(slot));
            if let Some(entry) = catalog.entry_from_slot(slot) {
                writes.push(CatalogWrite::Binding(entry.name));
            }
        }
        Ok(dropped)
    }
}

/// Shorthand for a table payload with the given columns.
pub fn table(columns: &[(&str, Type)]) -> CatalogObject {
    CatalogObject::Table(TableDef {
        columns: columns.iter().map(|(name, ty)| ColumnDef::new(*name, *ty)).collect(),
    })
}
