// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 QuarryDB

//! Transactional object catalog.
//!
//! Maps names to versioned schema objects (tables, views, functions, types)
//! under snapshot isolation. Every transaction resolves names against a
//! consistent view as of its own start version; concurrent writers of the
//! same object fail fast with a conflict instead of blocking.
//!
//! The structure is two cooperating indices: a name index of time-ordered
//! binding chains and an object store of per-slot version chains. All
//! mutation is serialized by one exclusive lock per [`Catalog`].

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use quarry_core::Result;

pub use catalog::{Catalog, CatalogEntry, CatalogWrite};
pub use interface::{CatalogTransaction, DefaultGenerator, DependencyManager, NoDependencies};
pub use object::{
    Alteration, CatalogObject, ColumnDef, FunctionDef, SumTypeDef, TableDef, ViewDef,
};
pub use version::{EntryVersion, SlotId};

mod binding;
pub mod catalog;
mod interface;
mod object;
mod similarity;
pub mod test_utils;
mod version;
mod visibility;
