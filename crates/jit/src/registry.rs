// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::{collections::HashMap, sync::Arc};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::{CompiledModule, JitError, ModuleLoader, NativeLibraryLoader};

/// Tag-addressed cache of loaded modules, append-only for the process
/// lifetime.
pub struct JitModuleRegistry {
	loader: Box<dyn ModuleLoader>,
	modules: RwLock<HashMap<String, Arc<CompiledModule>>>,
}

impl JitModuleRegistry {
	pub fn new() -> Self {
		Self::with_loader(NativeLibraryLoader::new())
	}

	pub fn with_loader(loader: impl ModuleLoader) -> Self {
		Self {
			loader: Box::new(loader),
			modules: RwLock::new(HashMap::new()),
		}
	}

	/// Load `blob` under `tag` unless a module with that tag already
	/// exists. Idempotent: concurrent initializations are serialized by the
	/// write lock and at most one load wins; a loaded module is never
	/// replaced.
	pub fn init_module(&self, tag: &str, blob: &[u8]) -> crate::Result<()> {
		if self.modules.read().contains_key(tag) {
			return Ok(());
		}

		let mut modules = self.modules.write();
		// Re-check under the write lock: another thread may have won
		if modules.contains_key(tag) {
			return Ok(());
		}

		let backend = self.loader.load(tag, blob)?;
		debug!(tag, "module loaded");
		modules.insert(tag.to_string(), Arc::new(CompiledModule::new(tag, backend)));
		Ok(())
	}

	pub fn get_module(&self, tag: &str) -> crate::Result<Arc<CompiledModule>> {
		self.modules.read().get(tag).cloned().ok_or_else(|| JitError::ModuleNotFound {
			tag: tag.to_string(),
		})
	}

	pub fn contains(&self, tag: &str) -> bool {
		self.modules.read().contains_key(tag)
	}
}

impl Default for JitModuleRegistry {
	fn default() -> Self {
		Self::new()
	}
}

static REGISTRY: Lazy<JitModuleRegistry> = Lazy::new(JitModuleRegistry::new);

/// The process-wide registry shared by every operator instance.
pub fn registry() -> &'static JitModuleRegistry {
	&REGISTRY
}

#[cfg(test)]
mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicUsize, Ordering},
	};

	use super::JitModuleRegistry;
	use crate::{JitError, ModuleBackend, ModuleLoader, RET_OK, RawRowFn};

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
				return crate::RET_BUFFER_TOO_SMALL;
			}
			std::ptr::copy_nonoverlapping(input, out, input_len);
		}
		RET_OK
	}

	unsafe extern "C" fn wide_output(
		_input: *const u8,
		_input_len: usize,
		out: *mut u8,
		out_cap: usize,
		out_len: *mut usize,
	) -> i32 {
		const WIDTH: usize = 1024;
		unsafe {
			*out_len = WIDTH;
			if WIDTH > out_cap {
				return crate::RET_BUFFER_TOO_SMALL;
			}
			std::ptr::write_bytes(out, 0x7F, WIDTH);
		}
		RET_OK
	}

	unsafe extern "C" fn always_fails(
		_input: *const u8,
		_input_len: usize,
		_out: *mut u8,
		_out_cap: usize,
		_out_len: *mut usize,
	) -> i32 {
		-7
	}

	#[derive(Debug)]
	struct TableBackend;

	impl ModuleBackend for TableBackend {
		fn find_raw(&self, name: &str) -> Option<RawRowFn> {
			match name {
				"identity" => Some(identity as RawRowFn),
				"wide_output" => Some(wide_output as RawRowFn),
				"always_fails" => Some(always_fails as RawRowFn),
				_ => None,
			}
		}
	}

	struct CountingLoader {
		loads: Arc<AtomicUsize>,
	}

	impl ModuleLoader for CountingLoader {
		fn load(&self, _tag: &str, _blob: &[u8]) -> crate::Result<Box<dyn ModuleBackend>> {
			self.loads.fetch_add(1, Ordering::SeqCst);
			Ok(Box::new(TableBackend))
		}
	}

	fn registry_with_counter() -> (JitModuleRegistry, Arc<AtomicUsize>) {
		let loads = Arc::new(AtomicUsize::new(0));
		let registry = JitModuleRegistry::with_loader(CountingLoader {
			loads: loads.clone(),
		});
		(registry, loads)
	}

	#[test]
	fn test_init_module_idempotent() {
		let (registry, loads) = registry_with_counter();

		registry.init_module("m1", b"blob").unwrap();
		registry.init_module("m1", b"blob").unwrap();

		assert_eq!(loads.load(Ordering::SeqCst), 1);

		let first = registry.get_module("m1").unwrap();
		let second = registry.get_module("m1").unwrap();
		assert!(Arc::ptr_eq(&first, &second));
	}

	#[test]
	fn test_unknown_tag() {
		let (registry, _) = registry_with_counter();
		let err = registry.get_module("missing").unwrap_err();
		assert!(matches!(err, JitError::ModuleNotFound { .. }));
	}

	#[test]
	fn test_find_function() {
		let (registry, _) = registry_with_counter();
		registry.init_module("m1", b"blob").unwrap();

		let module = registry.get_module("m1").unwrap();
		assert!(module.find_function("identity").is_ok());

		let err = module.find_function("missing_fn").unwrap_err();
		assert!(matches!(err, JitError::FunctionNotFound { .. }));
	}

	#[test]
	fn test_invoke_identity() {
		let (registry, _) = registry_with_counter();
		registry.init_module("m1", b"blob").unwrap();

		let module = registry.get_module("m1").unwrap();
		let function = module.find_function("identity").unwrap();

		let input = rowjet_row::EncodedRow::from(vec![1u8, 2, 3, 4]);
		let output = function.invoke(&input).unwrap();
		assert_eq!(output.as_slice(), input.as_slice());
	}

	#[test]
	fn test_invoke_renegotiates_buffer() {
		let (registry, _) = registry_with_counter();
		registry.init_module("m1", b"blob").unwrap();

		let module = registry.get_module("m1").unwrap();
		let function = module.find_function("wide_output").unwrap();

		// First attempt offers a small buffer, so the function reports the
		// size it needs and the call is retried
		let input = rowjet_row::EncodedRow::from(vec![0u8; 4]);
		let output = function.invoke(&input).unwrap();
		assert_eq!(output.len(), 1024);
		assert!(output.as_slice().iter().all(|b| *b == 0x7F));
	}

	#[test]
	fn test_invoke_failure_code() {
		let (registry, _) = registry_with_counter();
		registry.init_module("m1", b"blob").unwrap();

		let module = registry.get_module("m1").unwrap();
		let function = module.find_function("always_fails").unwrap();

		let input = rowjet_row::EncodedRow::from(vec![0u8; 4]);
		let err = function.invoke(&input).unwrap_err();
		assert!(matches!(err, JitError::InvocationFailed { code: -7, .. }));
	}

	#[test]
	fn test_concurrent_init_loads_once() {
		let (registry, loads) = registry_with_counter();
		let registry = Arc::new(registry);

		let handles: Vec<_> = (0..8)
			.map(|_| {
				let registry = registry.clone();
				std::thread::spawn(move || registry.init_module("m1", b"blob").unwrap())
			})
			.collect();
		for handle in handles {
			handle.join().unwrap();
		}

		assert_eq!(loads.load(Ordering::SeqCst), 1);
	}
}
