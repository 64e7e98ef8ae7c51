// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use serde::{Deserialize, Serialize};

use rowjet_catalog::SchemaCatalog;

use crate::{EngineOptions, PhysicalPlan};

/// The canonical success status message.
pub const STATUS_OK: &str = "ok";

/// Status reported by the external compiler.
///
/// The one and only success value is the literal `"ok"`; every other
/// message, including an empty one, is a failure. Callers must check the
/// status text and never rely on plan presence alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileStatus {
	pub message: String,
}

impl CompileStatus {
	pub fn ok() -> Self {
		Self {
			message: STATUS_OK.to_string(),
		}
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}

	pub fn is_ok(&self) -> bool {
		self.message == STATUS_OK
	}
}

/// Metadata describing a successful compile: enough to later resolve the
/// produced functions inside the compiled module.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompileInfo {
	pub module_tag: String,
	pub functions: Vec<String>,
	/// Intermediate representation, retained only under `keep_ir`.
	pub ir: Option<String>,
}

/// An opaque unit of compiled machine code, addressed by tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleBlob {
	pub tag: String,
	pub bytes: Vec<u8>,
}

/// Everything a compile call returns. On failure only `status` is
/// meaningful; no partial plan is exposed.
#[derive(Clone, Debug)]
pub struct CompileOutput {
	pub status: CompileStatus,
	pub plan: Option<PhysicalPlan>,
	pub info: Option<CompileInfo>,
	pub module: Option<ModuleBlob>,
}

impl CompileOutput {
	pub fn failure(message: impl Into<String>) -> Self {
		Self {
			status: CompileStatus::error(message),
			plan: None,
			info: None,
			module: None,
		}
	}
}

/// The external SQL compiler.
///
/// Validates SQL syntax and semantics against the named database's schemas
/// and, on success, produces a physical plan, compile metadata and the
/// compiled module blob. Grammar, rewrite rules and instruction selection
/// all live behind this trait.
pub trait SqlCompiler {
	fn compile(
		&self,
		sql: &str,
		database: &str,
		catalog: &SchemaCatalog,
		options: &EngineOptions,
	) -> CompileOutput;
}

#[cfg(test)]
mod tests {
	use super::CompileStatus;

	#[test]
	fn test_only_literal_ok_is_success() {
		assert!(CompileStatus::ok().is_ok());
		assert!(!CompileStatus::error("").is_ok());
		assert!(!CompileStatus::error("OK").is_ok());
		assert!(!CompileStatus::error("ok ").is_ok());
		assert!(!CompileStatus::error("SQL parse error").is_ok());
	}
}
