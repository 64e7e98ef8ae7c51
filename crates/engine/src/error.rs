// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use rowjet_catalog::CatalogError;
use rowjet_jit::JitError;
use rowjet_type::Type;

/// A row failed to convert between the external record representation and
/// the internal binary format. Fatal to the record being processed; the
/// operator propagates it to the caller rather than dropping the record.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
	#[error("column '{column}' expects {expected}, got {actual}")]
	TypeMismatch {
		column: String,
		expected: Type,
		actual: Type,
	},

	#[error("column '{column}' is not nullable")]
	NullabilityViolation {
		column: String,
	},

	#[error("record has {actual} values, schema has {expected} columns")]
	ColumnCountMismatch {
		expected: usize,
		actual: usize,
	},
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
	#[error("sql statement is empty")]
	EmptySql,

	/// The compiler's own diagnostic text, verbatim.
	#[error("SQL compile error: {message}")]
	Compilation {
		message: String,
	},

	#[error("resource used after close")]
	UseAfterClose,

	#[error("operator is not open")]
	NotOpen,

	#[error(transparent)]
	Catalog(#[from] CatalogError),

	#[error(transparent)]
	Jit(#[from] JitError),

	#[error(transparent)]
	Encoding(#[from] EncodingError),
}
