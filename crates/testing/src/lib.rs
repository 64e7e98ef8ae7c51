// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! Test doubles for the compile and load boundaries.
//!
//! [`FixtureCompiler`] understands just enough SQL to resolve a projection
//! against a registered schema and emits a module blob that
//! [`FixtureLoader`] can "load" without any real code generation, so the
//! whole compile-to-invoke path can be exercised in-process.

pub use compiler::FixtureCompiler;
pub use init::init_tracing;
pub use loader::{FixtureLoader, ModuleManifest};

mod compiler;
mod init;
mod loader;
