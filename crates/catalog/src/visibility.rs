// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Snapshot visibility and write-write conflict rules, applied identically to
//! binding chains and version chains.

use crate::interface::CatalogTransaction;
use quarry_core::TransactionId;

/// Whether a chain node created by `created` is visible to `txn`.
///
/// Own writes are always visible. Foreign writes are visible exactly when
/// their transaction committed at or below the caller's start version.
pub(crate) fn visible_to(txn: &impl CatalogTransaction, created: TransactionId) -> bool {
    if created == txn.id() {
        return true;
    }
    match txn.commit_version_of(created) {
        Some(commit) => commit <= txn.start_version(),
        None => false,
    }
}

/// Whether writing over a chain head created by `created` conflicts for `txn`.
///
/// A head conflicts when its creator is a different transaction that either
/// has not committed yet, or committed after the caller's snapshot was taken.
/// The second case is a committed write the caller cannot see; appending over
/// it would silently lose it.
pub(crate) fn conflicts_with(txn: &impl CatalogTransaction, created: TransactionId) -> bool {
    if created == txn.id() {
        return false;
    }
    match txn.commit_version_of(created) {
        Some(commit) => commit > txn.start_version(),
        None => true,
    }
}
