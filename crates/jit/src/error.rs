// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

#[derive(Debug, thiserror::Error)]
pub enum JitError {
	#[error("no module loaded under tag '{tag}'")]
	ModuleNotFound {
		tag: String,
	},

	#[error("function '{name}' not found in module '{tag}'")]
	FunctionNotFound {
		tag: String,
		name: String,
	},

	#[error("failed to load module '{tag}': {reason}")]
	LoadFailed {
		tag: String,
		reason: String,
	},

	#[error("function '{function}' failed with code {code}")]
	InvocationFailed {
		function: String,
		code: i32,
	},
}
