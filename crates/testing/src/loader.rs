// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use rowjet_jit::{JitError, ModuleBackend, ModuleLoader, RET_BUFFER_TOO_SMALL, RET_OK, RawRowFn};

/// What a fixture module blob actually contains: a JSON map from exported
/// entry-point name to the builtin that backs it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModuleManifest {
	pub functions: BTreeMap<String, String>,
}

impl ModuleManifest {
	pub fn new() -> Self {
		Self {
			functions: BTreeMap::new(),
		}
	}

	pub fn export(mut self, name: impl Into<String>, builtin: impl Into<String>) -> Self {
		self.functions.insert(name.into(), builtin.into());
		self
	}

	pub fn to_bytes(&self) -> Vec<u8> {
		// Serialization of a string map cannot fail
		serde_json::to_vec(self).unwrap_or_default()
	}
}

impl Default for ModuleManifest {
	fn default() -> Self {
		Self::new()
	}
}

/// Loads fixture module blobs: parses the manifest and wires each exported
/// name to an in-process builtin instead of dlopening anything.
pub struct FixtureLoader;

impl ModuleLoader for FixtureLoader {
	fn load(&self, tag: &str, blob: &[u8]) -> rowjet_jit::Result<Box<dyn ModuleBackend>> {
		let manifest: ModuleManifest = serde_json::from_slice(blob).map_err(|e| JitError::LoadFailed {
			tag: tag.to_string(),
			reason: format!("invalid module manifest: {e}"),
		})?;

		let mut exports = BTreeMap::new();
		for (name, builtin) in &manifest.functions {
			let raw = builtin_fn(builtin).ok_or_else(|| JitError::LoadFailed {
				tag: tag.to_string(),
				reason: format!("unknown builtin '{builtin}' for entry point '{name}'"),
			})?;
			exports.insert(name.clone(), raw);
		}

		debug!(tag, exports = exports.len(), "fixture module loaded");
		Ok(Box::new(FixtureBackend {
			exports,
		}))
	}
}

#[derive(Debug)]
struct FixtureBackend {
	exports: BTreeMap<String, RawRowFn>,
}

impl ModuleBackend for FixtureBackend {
	fn find_raw(&self, name: &str) -> Option<RawRowFn> {
		self.exports.get(name).copied()
	}
}

fn builtin_fn(name: &str) -> Option<RawRowFn> {
	match name {
		"identity" => Some(identity as RawRowFn),
		"fail" => Some(fail as RawRowFn),
		_ => None,
	}
}

/// Copies the input row to the output unchanged.
unsafe extern "C" fn identity(
	input: *const u8,
	input_len: usize,
	out: *mut u8,
	out_cap: usize,
	out_len: *mut usize,
) -> i32 {
	unsafe {
		*out_len = input_len;
		if input_len > out_cap {
			return RET_BUFFER_TOO_SMALL;
		}
		std::ptr::copy_nonoverlapping(input, out, input_len);
	}
	RET_OK
}

/// Always reports a function-level failure.
unsafe extern "C" fn fail(
	_input: *const u8,
	_input_len: usize,
	_out: *mut u8,
	_out_cap: usize,
	_out_len: *mut usize,
) -> i32 {
	-1
}
