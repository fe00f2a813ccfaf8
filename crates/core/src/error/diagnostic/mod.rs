// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Structured diagnostics, grouped by subsystem.
//!
//! Every failure in the workspace is described by a [`Diagnostic`] with a
//! stable string code. Constructor functions live in the per-subsystem
//! modules below; callers match on codes, not on message text.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod catalog;
pub mod internal;
pub mod transaction;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
    pub label: Option<String>,
    pub help: Option<String>,
    pub notes: Vec<String>,
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}", self.code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostics_round_trip_through_json() {
        let diagnostic = catalog::entry_not_found("orders");
        let json = serde_json::to_string(&diagnostic).unwrap();
        let back: Diagnostic = serde_json::from_str(&json).unwrap();
        assert_eq!(back, diagnostic);
        assert_eq!(back.code, "CA_002");
    }
}
