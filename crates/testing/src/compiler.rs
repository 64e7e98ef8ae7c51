// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use tracing::debug;

use rowjet_catalog::{ColumnDef, SchemaCatalog};
use rowjet_sql::{
	CompileInfo, CompileOutput, CompileStatus, EngineOptions, ModuleBlob, PhysicalPlan, ProjectNode, SqlCompiler,
	TableScanNode,
};

use crate::ModuleManifest;

const PROJECT_FN: &str = "project_fn";

/// A deliberately tiny SQL compiler for tests.
///
/// Understands only `SELECT col[, col]* FROM table`, resolves every name
/// against the registered schemas, and emits a scan-project plan whose
/// projection function is the manifest-backed `identity` builtin. Anything
/// it cannot parse or resolve comes back as a non-`"ok"` status with a
/// human-readable message, exactly like a real compiler would report it.
pub struct FixtureCompiler {
	module_tag: String,
}

impl FixtureCompiler {
	pub fn new() -> Self {
		Self::with_module_tag("fixture")
	}

	pub fn with_module_tag(module_tag: impl Into<String>) -> Self {
		Self {
			module_tag: module_tag.into(),
		}
	}
}

impl Default for FixtureCompiler {
	fn default() -> Self {
		Self::new()
	}
}

impl SqlCompiler for FixtureCompiler {
	fn compile(
		&self,
		sql: &str,
		database: &str,
		catalog: &SchemaCatalog,
		options: &EngineOptions,
	) -> CompileOutput {
		let Some((column_names, table_name)) = parse_projection(sql) else {
			return CompileOutput::failure(format!("unsupported statement: {}", sql.trim()));
		};

		let table = match catalog.get_table(database, &table_name) {
			Ok(table) => table,
			Err(e) => return CompileOutput::failure(e.to_string()),
		};

		let mut columns: Vec<ColumnDef> = Vec::with_capacity(column_names.len());
		for name in &column_names {
			match table.find_column(name) {
				Some(column) => columns.push(column.clone()),
				None => {
					return CompileOutput::failure(format!(
						"unknown column '{name}' in table '{table_name}'"
					));
				}
			}
		}

		debug!(database, table = %table_name, columns = columns.len(), "fixture compile");

		let plan = PhysicalPlan::Project(ProjectNode {
			input: Box::new(PhysicalPlan::TableScan(TableScanNode {
				table: table_name,
				columns: table.columns.clone(),
			})),
			function_name: PROJECT_FN.to_string(),
			module_tag: self.module_tag.clone(),
			columns,
		});

		let info = CompileInfo {
			module_tag: self.module_tag.clone(),
			functions: vec![PROJECT_FN.to_string()],
			ir: options.keep_ir.then(|| format!("; fixture ir for: {}", sql.trim())),
		};

		let module = ModuleBlob {
			tag: self.module_tag.clone(),
			bytes: ModuleManifest::new().export(PROJECT_FN, "identity").to_bytes(),
		};

		CompileOutput {
			status: CompileStatus::ok(),
			plan: Some(plan),
			info: Some(info),
			module: Some(module),
		}
	}
}

/// Split `SELECT a, b FROM t` into column names and table name. Returns
/// `None` for anything outside that shape.
fn parse_projection(sql: &str) -> Option<(Vec<String>, String)> {
	let sql = sql.trim().trim_end_matches(';').trim();
	let lower = sql.to_ascii_lowercase();

	let rest = lower.strip_prefix("select ")?;
	let from = rest.find(" from ")?;

	let select_list = &sql[7..7 + from];
	let table = sql[7 + from + 6..].trim();
	if table.is_empty() || table.contains(char::is_whitespace) {
		return None;
	}

	let mut columns = Vec::new();
	for part in select_list.split(',') {
		let name = part.trim();
		if name.is_empty() || name.contains(char::is_whitespace) {
			return None;
		}
		columns.push(name.to_string());
	}

	Some((columns, table.to_string()))
}
