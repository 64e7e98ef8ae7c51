// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::{fs, path::PathBuf, process};

use libloading::Library;
use tracing::debug;

use crate::{JitError, ModuleBackend, RawRowFn};

/// Turns an opaque module blob into a usable [`ModuleBackend`].
pub trait ModuleLoader: Send + Sync + 'static {
	fn load(&self, tag: &str, blob: &[u8]) -> crate::Result<Box<dyn ModuleBackend>>;
}

/// Default loader: persists the blob next to the process temp dir and
/// dlopens it as a shared library.
///
/// The file stays on disk for the process lifetime; modules are never
/// unloaded, so the mapping must outlive every resolved function address.
#[derive(Default)]
pub struct NativeLibraryLoader;

impl NativeLibraryLoader {
	pub fn new() -> Self {
		Self
	}

	fn blob_path(tag: &str) -> PathBuf {
		let sanitized: String =
			tag.chars().map(|c| if c.is_ascii_alphanumeric() { c } else { '_' }).collect();
		std::env::temp_dir().join(format!("rowjet-{}-{}.module", process::id(), sanitized))
	}
}

impl ModuleLoader for NativeLibraryLoader {
	fn load(&self, tag: &str, blob: &[u8]) -> crate::Result<Box<dyn ModuleBackend>> {
		let path = Self::blob_path(tag);
		fs::write(&path, blob).map_err(|e| JitError::LoadFailed {
			tag: tag.to_string(),
			reason: e.to_string(),
		})?;

		debug!(tag, path = %path.display(), bytes = blob.len(), "loading native module");

		let library = unsafe { Library::new(&path) }.map_err(|e| JitError::LoadFailed {
			tag: tag.to_string(),
			reason: e.to_string(),
		})?;

		Ok(Box::new(NativeModule {
			library,
		}))
	}
}

#[derive(Debug)]
struct NativeModule {
	library: Library,
}

impl ModuleBackend for NativeModule {
	fn find_raw(&self, name: &str) -> Option<RawRowFn> {
		unsafe { self.library.get::<RawRowFn>(name.as_bytes()).ok().map(|sym| *sym) }
	}
}
