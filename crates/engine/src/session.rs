// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use parking_lot::Mutex;
use tracing::{debug, instrument};

use rowjet_catalog::SchemaCatalog;
use rowjet_sql::{CompileInfo, EngineOptions, ModuleBlob, PhysicalPlan, SqlCompiler};

use crate::EngineError;

/// One compiled SQL statement and everything the compile allocated for it.
///
/// The session exclusively owns the plan, the compile metadata, the module
/// blob and the options it consumed; all of it is released together, in a
/// fixed order, by [`close`](Self::close). A session is not meant for
/// concurrent use, but close is internally serialized so racing closers
/// cannot run the release sequence twice.
#[derive(Debug)]
pub struct CompileSession {
	database: String,
	inner: Mutex<Option<SessionInner>>,
}

#[derive(Debug)]
struct SessionInner {
	options: EngineOptions,
	plan: PhysicalPlan,
	info: CompileInfo,
	module: Option<ModuleBlob>,
	catalog: SchemaCatalog,
}

impl CompileSession {
	/// Compile `sql` against `database`'s registered schemas.
	///
	/// The compiler's status text is the source of truth: only the literal
	/// `"ok"` counts as success, and even then a missing plan is treated as
	/// a compile failure rather than exposed as a half-built session.
	#[instrument(level = "trace", skip(sql, catalog, options, compiler))]
	pub fn compile(
		sql: &str,
		database: &str,
		catalog: &SchemaCatalog,
		options: EngineOptions,
		compiler: &dyn SqlCompiler,
	) -> crate::Result<Self> {
		if sql.trim().is_empty() {
			return Err(EngineError::EmptySql);
		}
		catalog.get_database(database)?;

		let output = compiler.compile(sql, database, catalog, &options);
		if !output.status.is_ok() {
			return Err(EngineError::Compilation {
				message: output.status.message,
			});
		}

		let (Some(plan), Some(info)) = (output.plan, output.info) else {
			return Err(EngineError::Compilation {
				message: "compiler reported ok without a plan".to_string(),
			});
		};

		debug!(database, module_tag = %info.module_tag, "sql compiled");

		Ok(Self {
			database: database.to_string(),
			inner: Mutex::new(Some(SessionInner {
				options,
				plan,
				info,
				module: output.module,
				catalog: catalog.clone(),
			})),
		})
	}

	pub fn database(&self) -> &str {
		&self.database
	}

	/// Root of the compiled operator tree. Valid only while the session is
	/// open.
	pub fn plan(&self) -> crate::Result<PhysicalPlan> {
		let guard = self.inner.lock();
		let inner = guard.as_ref().ok_or(EngineError::UseAfterClose)?;
		Ok(inner.plan.clone())
	}

	pub fn compile_info(&self) -> crate::Result<CompileInfo> {
		let guard = self.inner.lock();
		let inner = guard.as_ref().ok_or(EngineError::UseAfterClose)?;
		Ok(inner.info.clone())
	}

	/// The compiled module blob, if the compiler produced one in-line.
	pub fn module(&self) -> crate::Result<Option<ModuleBlob>> {
		let guard = self.inner.lock();
		let inner = guard.as_ref().ok_or(EngineError::UseAfterClose)?;
		Ok(inner.module.clone())
	}

	pub fn options(&self) -> crate::Result<EngineOptions> {
		let guard = self.inner.lock();
		let inner = guard.as_ref().ok_or(EngineError::UseAfterClose)?;
		Ok(inner.options.clone())
	}

	pub fn is_closed(&self) -> bool {
		self.inner.lock().is_none()
	}

	/// Release everything the session owns, exactly once.
	///
	/// The lock serializes racing closers: one runs the release sequence,
	/// the others observe the closed state.
	pub fn close(&self) -> crate::Result<()> {
		let mut guard = self.inner.lock();
		let Some(inner) = guard.take() else {
			return Err(EngineError::UseAfterClose);
		};

		// Fixed release order: plan first, catalog handle last
		let SessionInner {
			options,
			plan,
			info,
			module,
			catalog,
		} = inner;
		drop(plan);
		drop(info);
		drop(module);
		drop(options);
		drop(catalog);

		debug!(database = %self.database, "session closed");
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rowjet_catalog::{ColumnDef, DatabaseDef, SchemaCatalog, TableDef};
	use rowjet_sql::{CompileInfo, CompileOutput, CompileStatus, EngineOptions, PhysicalPlan, SqlCompiler, TableScanNode};
	use rowjet_type::Type;

	use super::CompileSession;
	use crate::EngineError;

	struct OkCompiler;

	impl SqlCompiler for OkCompiler {
		fn compile(
			&self,
			_sql: &str,
			_database: &str,
			_catalog: &SchemaCatalog,
			_options: &EngineOptions,
		) -> CompileOutput {
			CompileOutput {
				status: CompileStatus::ok(),
				plan: Some(PhysicalPlan::TableScan(TableScanNode {
					table: "t".into(),
					columns: vec![ColumnDef::new("a", Type::Int4)],
				})),
				info: Some(CompileInfo {
					module_tag: "m1".into(),
					functions: vec![],
					ir: None,
				}),
				module: None,
			}
		}
	}

	/// Reports success through the plan but not through the status text.
	struct LyingCompiler;

	impl SqlCompiler for LyingCompiler {
		fn compile(
			&self,
			_sql: &str,
			_database: &str,
			_catalog: &SchemaCatalog,
			_options: &EngineOptions,
		) -> CompileOutput {
			let mut output = OkCompiler.compile("", "", &SchemaCatalog::new(), &EngineOptions::new());
			output.status = CompileStatus::error("internal warning");
			output
		}
	}

	fn catalog() -> SchemaCatalog {
		let catalog = SchemaCatalog::new();
		catalog.register_database(DatabaseDef::new("db1", vec![TableDef::new("t", vec![])])).unwrap();
		catalog
	}

	#[test]
	fn test_compile_and_close() {
		let session =
			CompileSession::compile("SELECT a FROM t", "db1", &catalog(), EngineOptions::new(), &OkCompiler)
				.unwrap();

		assert!(session.plan().is_ok());
		assert!(!session.is_closed());

		session.close().unwrap();
		assert!(session.is_closed());
	}

	#[test]
	fn test_empty_sql_rejected() {
		let err = CompileSession::compile("  ", "db1", &catalog(), EngineOptions::new(), &OkCompiler)
			.unwrap_err();
		assert!(matches!(err, EngineError::EmptySql));
	}

	#[test]
	fn test_unregistered_database_rejected() {
		let err = CompileSession::compile("SELECT 1", "nope", &catalog(), EngineOptions::new(), &OkCompiler)
			.unwrap_err();
		assert!(matches!(err, EngineError::Catalog(_)));
	}

	#[test]
	fn test_non_ok_status_is_failure_even_with_plan() {
		let err = CompileSession::compile("SELECT 1", "db1", &catalog(), EngineOptions::new(), &LyingCompiler)
			.unwrap_err();
		match err {
			EngineError::Compilation {
				message,
			} => assert_eq!(message, "internal warning"),
			other => panic!("unexpected error: {other}"),
		}
	}

	#[test]
	fn test_second_close_detected() {
		let session =
			CompileSession::compile("SELECT a FROM t", "db1", &catalog(), EngineOptions::new(), &OkCompiler)
				.unwrap();

		session.close().unwrap();
		assert!(matches!(session.close().unwrap_err(), EngineError::UseAfterClose));
	}

	#[test]
	fn test_plan_after_close_detected() {
		let session =
			CompileSession::compile("SELECT a FROM t", "db1", &catalog(), EngineOptions::new(), &OkCompiler)
				.unwrap();

		session.close().unwrap();
		assert!(matches!(session.plan().unwrap_err(), EngineError::UseAfterClose));
		assert!(matches!(session.compile_info().unwrap_err(), EngineError::UseAfterClose));
	}

	#[test]
	fn test_concurrent_close_single_release() {
		let session = std::sync::Arc::new(
			CompileSession::compile("SELECT a FROM t", "db1", &catalog(), EngineOptions::new(), &OkCompiler)
				.unwrap(),
		);

		let handles: Vec<_> = (0..4)
			.map(|_| {
				let session = session.clone();
				std::thread::spawn(move || session.close().is_ok())
			})
			.collect();

		let successes = handles.into_iter().map(|h| h.join().unwrap()).filter(|&ok| ok).count();
		assert_eq!(successes, 1);
	}
}
