// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::sync::Arc;

use rowjet_row::EncodedRow;

use crate::JitError;

/// Success return code of a compiled row function.
pub const RET_OK: i32 = 0;
/// The output buffer was too small; the required size is in `out_len`.
pub const RET_BUFFER_TOO_SMALL: i32 = 1;

/// Signature contract of every compiled row function.
///
/// Reads one encoded input row from `input`/`input_len`, writes exactly one
/// encoded output row into `out` (capacity `out_cap`) and stores the written
/// length in `out_len`. Returns [`RET_OK`], [`RET_BUFFER_TOO_SMALL`] with
/// the required size in `out_len`, or a negative function-specific error
/// code. The callee never retains either buffer.
pub type RawRowFn =
	unsafe extern "C" fn(input: *const u8, input_len: usize, out: *mut u8, out_cap: usize, out_len: *mut usize) -> i32;

/// Where a module's entry points come from: a dlopened shared library in
/// production, an in-process symbol table in tests.
pub trait ModuleBackend: std::fmt::Debug + Send + Sync + 'static {
	/// Resolve an entry point by exact name match.
	fn find_raw(&self, name: &str) -> Option<RawRowFn>;
}

/// A loaded unit of compiled code, identified by its tag.
pub struct CompiledModule {
	tag: String,
	backend: Box<dyn ModuleBackend>,
}

impl CompiledModule {
	pub fn new(tag: impl Into<String>, backend: Box<dyn ModuleBackend>) -> Self {
		Self {
			tag: tag.into(),
			backend,
		}
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	/// Resolve a function by name into a stable, cacheable handle.
	///
	/// The handle keeps the module alive, so it stays valid even though the
	/// registry itself never unloads anything.
	pub fn find_function(self: &Arc<Self>, name: &str) -> crate::Result<FunctionAddress> {
		let raw = self.backend.find_raw(name).ok_or_else(|| JitError::FunctionNotFound {
			tag: self.tag.clone(),
			name: name.to_string(),
		})?;
		Ok(FunctionAddress {
			name: name.to_string(),
			raw,
			_module: Arc::clone(self),
		})
	}
}

impl std::fmt::Debug for CompiledModule {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompiledModule").field("tag", &self.tag).finish()
	}
}

/// A resolved entry point: raw function pointer plus the module that owns
/// it. Invocation is a single well-typed call, no name lookup per record.
#[derive(Clone)]
pub struct FunctionAddress {
	name: String,
	raw: RawRowFn,
	_module: Arc<CompiledModule>,
}

impl FunctionAddress {
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Apply the compiled function to one encoded row.
	///
	/// The caller owns `input` for the whole call and owns the returned row
	/// afterwards; the compiled code never retains either buffer. If the
	/// first output buffer is too small the call is retried once with the
	/// size the function asked for.
	pub fn invoke(&self, input: &EncodedRow) -> crate::Result<EncodedRow> {
		let mut cap = (input.len() * 2).max(64);

		for _ in 0..2 {
			let mut buf = vec![0u8; cap];
			let mut out_len = 0usize;

			let ret = unsafe {
				(self.raw)(input.as_ptr(), input.len(), buf.as_mut_ptr(), cap, &mut out_len)
			};

			match ret {
				RET_OK => {
					buf.truncate(out_len);
					return Ok(EncodedRow::from(buf));
				}
				RET_BUFFER_TOO_SMALL => {
					cap = out_len;
				}
				code => {
					return Err(JitError::InvocationFailed {
						function: self.name.clone(),
						code,
					});
				}
			}
		}

		// The function asked for a bigger buffer twice in a row
		Err(JitError::InvocationFailed {
			function: self.name.clone(),
			code: RET_BUFFER_TOO_SMALL,
		})
	}
}

impl std::fmt::Debug for FunctionAddress {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FunctionAddress")
			.field("name", &self.name)
			.field("module", &self._module.tag)
			.finish()
	}
}
