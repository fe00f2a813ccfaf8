// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

use std::fmt::{Display, Formatter};

pub mod diagnostic;

use diagnostic::Diagnostic;

/// The unified error type of the workspace: a thin newtype over the structured
/// [`Diagnostic`] that caused the failure.
#[derive(Debug, Clone, PartialEq)]
pub struct Error(pub Diagnostic);

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.0.code, self.0.message)
    }
}

impl Error {
    pub fn diagnostic(self) -> Diagnostic {
        self.0
    }

    pub fn code(&self) -> &str {
        &self.0.code
    }
}

impl std::error::Error for Error {}
