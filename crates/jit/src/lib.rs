// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! Process-wide registry of loaded compiled-code modules.
//!
//! A module is loaded at most once per tag and never unloaded; operators
//! resolve a function address once through [`CompiledModule::find_function`]
//! and then invoke it per record through the typed [`FunctionAddress`]
//! handle, never by name lookup.

pub use module::{CompiledModule, FunctionAddress, ModuleBackend, RET_BUFFER_TOO_SMALL, RET_OK, RawRowFn};
pub use error::JitError;
pub use loader::{ModuleLoader, NativeLibraryLoader};
pub use registry::{JitModuleRegistry, registry};

mod error;
mod loader;
mod module;
mod registry;

pub type Result<T> = std::result::Result<T, JitError>;
