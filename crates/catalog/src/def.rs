// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use serde::{Deserialize, Serialize};

use rowjet_type::Type;

/// One column of a table: name, logical type and nullability.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
	pub nullable: bool,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			nullable: true,
		}
	}

	pub fn not_null(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
			nullable: false,
		}
	}
}

/// A table: name plus an ordered sequence of column definitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableDef {
	pub name: String,
	pub columns: Vec<ColumnDef>,
}

impl TableDef {
	pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
		Self {
			name: name.into(),
			columns,
		}
	}

	pub fn find_column(&self, name: &str) -> Option<&ColumnDef> {
		self.columns.iter().find(|c| c.name == name)
	}

	pub fn column_types(&self) -> Vec<Type> {
		self.columns.iter().map(|c| c.ty).collect()
	}
}

/// A database: name plus an ordered set of tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseDef {
	pub name: String,
	pub tables: Vec<TableDef>,
}

impl DatabaseDef {
	pub fn new(name: impl Into<String>, tables: Vec<TableDef>) -> Self {
		Self {
			name: name.into(),
			tables,
		}
	}

	pub fn find_table(&self, name: &str) -> Option<&TableDef> {
		self.tables.iter().find(|t| t.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::{ColumnDef, DatabaseDef, TableDef};
	use rowjet_type::Type;

	#[test]
	fn test_find_column() {
		let table = TableDef::new("t", vec![ColumnDef::new("a", Type::Int4), ColumnDef::new("b", Type::Utf8)]);
		assert_eq!(table.find_column("b").map(|c| c.ty), Some(Type::Utf8));
		assert_eq!(table.find_column("c"), None);
	}

	#[test]
	fn test_find_table() {
		let db = DatabaseDef::new("db1", vec![TableDef::new("t", vec![])]);
		assert!(db.find_table("t").is_some());
		assert!(db.find_table("u").is_none());
	}
}
