// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

/// Monotonically increasing commit version allocated by the transaction
/// manager. A transaction's start version is the newest commit version that
/// existed when the transaction began.
pub type Version = u64;

/// Identity of a transaction. Node timestamps in catalog chains always store
/// the creating transaction's id; whether and when that transaction committed
/// is resolved through the transaction oracle at read time.
pub type TransactionId = u64;

/// Reserved transaction id for bootstrapped entries (e.g. lazily generated
/// built-in objects). Reports commit version 0 and is therefore visible to
/// every transaction.
pub const SYSTEM_TXN: TransactionId = 0;
