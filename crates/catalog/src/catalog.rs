// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::{collections::HashMap, sync::Arc};

use parking_lot::RwLock;
use tracing::debug;

use crate::{CatalogError, DatabaseDef, TableDef};

/// Shared registry of database schemas.
///
/// Cloning is cheap; all clones observe the same registrations. Databases
/// are registered once and never replaced: a duplicate registration is
/// rejected rather than silently overwriting a schema a running session may
/// still be compiled against.
#[derive(Clone, Debug, Default)]
pub struct SchemaCatalog {
	databases: Arc<RwLock<HashMap<String, DatabaseDef>>>,
}

impl SchemaCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_database(&self, database: DatabaseDef) -> crate::Result<()> {
		let mut databases = self.databases.write();
		if databases.contains_key(&database.name) {
			return Err(CatalogError::DatabaseAlreadyExists {
				name: database.name,
			});
		}
		debug!(database = %database.name, tables = database.tables.len(), "registering database");
		databases.insert(database.name.clone(), database);
		Ok(())
	}

	pub fn find_database(&self, name: &str) -> Option<DatabaseDef> {
		self.databases.read().get(name).cloned()
	}

	pub fn get_database(&self, name: &str) -> crate::Result<DatabaseDef> {
		self.find_database(name).ok_or_else(|| CatalogError::DatabaseNotFound {
			name: name.to_string(),
		})
	}

	pub fn get_table(&self, database: &str, table: &str) -> crate::Result<TableDef> {
		let db = self.get_database(database)?;
		db.find_table(table).cloned().ok_or_else(|| CatalogError::TableNotFound {
			database: database.to_string(),
			table: table.to_string(),
		})
	}

	pub fn contains_database(&self, name: &str) -> bool {
		self.databases.read().contains_key(name)
	}
}

#[cfg(test)]
mod tests {
	use super::SchemaCatalog;
	use crate::{CatalogError, ColumnDef, DatabaseDef, TableDef};
	use rowjet_type::Type;

	fn db1() -> DatabaseDef {
		DatabaseDef::new(
			"db1",
			vec![TableDef::new("t", vec![ColumnDef::new("a", Type::Int4), ColumnDef::new("b", Type::Utf8)])],
		)
	}

	#[test]
	fn test_register_and_lookup() {
		let catalog = SchemaCatalog::new();
		catalog.register_database(db1()).unwrap();

		assert!(catalog.contains_database("db1"));
		let table = catalog.get_table("db1", "t").unwrap();
		assert_eq!(table.columns.len(), 2);
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let catalog = SchemaCatalog::new();
		catalog.register_database(db1()).unwrap();

		let err = catalog.register_database(db1()).unwrap_err();
		assert!(matches!(err, CatalogError::DatabaseAlreadyExists { .. }));
	}

	#[test]
	fn test_unknown_database() {
		let catalog = SchemaCatalog::new();
		let err = catalog.get_database("missing").unwrap_err();
		assert!(matches!(err, CatalogError::DatabaseNotFound { .. }));
	}

	#[test]
	fn test_unknown_table() {
		let catalog = SchemaCatalog::new();
		catalog.register_database(db1()).unwrap();

		let err = catalog.get_table("db1", "u").unwrap_err();
		assert!(matches!(err, CatalogError::TableNotFound { .. }));
	}

	#[test]
	fn test_clones_share_registrations() {
		let catalog = SchemaCatalog::new();
		let clone = catalog.clone();
		catalog.register_database(db1()).unwrap();
		assert!(clone.contains_database("db1"));
	}
}
