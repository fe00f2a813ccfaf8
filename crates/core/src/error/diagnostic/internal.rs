// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use super::Diagnostic;

/// An internal invariant was broken (inconsistent chain state). This is a bug,
/// not a recoverable condition: the operation aborts and leaves the structure
/// untouched for inspection.
pub fn invariant_violation(message: impl Into<String>) -> Diagnostic {
    Diagnostic {
        code: "INT_001".to_string(),
        message: message.into(),
        label: Some("internal invariant violation".to_string()),
        help: Some("this indicates a bug; please report it".to_string()),
        notes: vec![],
    }
}
