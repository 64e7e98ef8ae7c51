// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! The compile boundary: engine options, the physical plan produced by a
//! compile call, and the [`SqlCompiler`] trait behind which the actual
//! parser, optimizer and code generator live.
//!
//! rowjet does not define the SQL grammar or the codegen algorithm; it
//! consumes a compiler through [`SqlCompiler`] and treats the produced
//! module blob as opaque machine code.

pub use compile::{CompileInfo, CompileOutput, CompileStatus, ModuleBlob, SqlCompiler};
pub use options::EngineOptions;
pub use plan::{FilterNode, JoinNode, PhysicalPlan, ProjectNode, TableScanNode};

mod compile;
mod options;
mod plan;
