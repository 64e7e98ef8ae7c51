// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! In-memory registry of databases, tables and column schemas.
//!
//! Databases are registered before any compile call references them and are
//! never mutated while a compile session uses them.

pub use catalog::SchemaCatalog;
pub use def::{ColumnDef, DatabaseDef, TableDef};
pub use error::CatalogError;

mod catalog;
mod def;
mod error;

pub type Result<T> = std::result::Result<T, CatalogError>;
