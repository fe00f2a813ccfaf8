// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use super::Diagnostic;

/// A write raced a concurrent transaction on the same catalog object. The
/// transaction manager decides whether to retry or abort; the catalog never
/// retries internally.
pub fn transaction_conflict(name: &str) -> Diagnostic {
    Diagnostic {
        code: "TXN_001".to_string(),
        message: format!(
            "write-write conflict on catalog entry '{}': a concurrent transaction modified it",
            name
        ),
        label: Some("conflicting write".to_string()),
        help: Some("abort and retry the transaction".to_string()),
        notes: vec![],
    }
}
