// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use serde::{Deserialize, Serialize};

/// Engine-wide compile options.
///
/// Built once, handed to a compile call, and owned by the session that
/// results from it; nothing mutates the options after that hand-over.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineOptions {
	/// Retain the intermediate representation for later inspection.
	pub keep_ir: bool,
	/// Produce a plan without enabling execution.
	pub compile_only: bool,
	/// Trade compile time for runtime speed.
	pub performance_sensitive: bool,
}

impl EngineOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn keep_ir(mut self, keep_ir: bool) -> Self {
		self.keep_ir = keep_ir;
		self
	}

	pub fn compile_only(mut self, compile_only: bool) -> Self {
		self.compile_only = compile_only;
		self
	}

	pub fn performance_sensitive(mut self, performance_sensitive: bool) -> Self {
		self.performance_sensitive = performance_sensitive;
		self
	}
}
