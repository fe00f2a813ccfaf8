// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use super::Diagnostic;

/// A create collided with a binding that is live from the writer's point of
/// view (or with a committed binding its snapshot cannot see).
pub fn entry_already_exists(name: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_001".to_string(),
        message: format!("catalog entry '{}' already exists", name),
        label: Some("duplicate entry".to_string()),
        help: Some("use a different name or drop the existing entry first".to_string()),
        notes: vec![],
    }
}

/// No live binding for the name is visible to the calling transaction.
pub fn entry_not_found(name: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_002".to_string(),
        message: format!("catalog entry '{}' does not exist", name),
        label: Some("unknown entry".to_string()),
        help: None,
        notes: vec![],
    }
}

/// Drop without cascade was blocked by live dependents.
pub fn entry_in_use(name: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_003".to_string(),
        message: format!("cannot drop catalog entry '{}': other objects depend on it", name),
        label: Some("entry has dependents".to_string()),
        help: Some("drop the dependents first or use cascade".to_string()),
        notes: vec![],
    }
}

/// The requested alteration only applies to tables.
pub fn not_a_table(name: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_004".to_string(),
        message: format!("catalog entry '{}' is not a table and cannot be altered this way", name),
        label: None,
        help: None,
        notes: vec![],
    }
}

pub fn column_already_exists(entry: &str, column: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_005".to_string(),
        message: format!("column '{}' already exists in '{}'", column, entry),
        label: Some("duplicate column".to_string()),
        help: None,
        notes: vec![],
    }
}

pub fn column_not_found(entry: &str, column: &str) -> Diagnostic {
    Diagnostic {
        code: "CA_006".to_string(),
        message: format!("column '{}' does not exist in '{}'", column, entry),
        label: Some("unknown column".to_string()),
        help: None,
        notes: vec![],
    }
}
