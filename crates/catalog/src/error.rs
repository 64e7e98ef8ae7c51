// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
	#[error("database '{name}' is already registered")]
	DatabaseAlreadyExists {
		name: String,
	},

	#[error("database '{name}' not found")]
	DatabaseNotFound {
		name: String,
	},

	#[error("table '{table}' not found in database '{database}'")]
	TableNotFound {
		database: String,
		table: String,
	},
}
