// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::Error;
pub use r#type::Type;
pub use version::{SYSTEM_TXN, TransactionId, Version};

pub mod error;
mod r#type;
mod version;

pub type Result<T> = std::result::Result<T, Error>;

/// Returns an `Err` built from a [`crate::error::diagnostic::Diagnostic`].
#[macro_export]
macro_rules! return_error {
    ($diagnostic:expr) => {
        return Err($crate::Error($diagnostic))
    };
}
