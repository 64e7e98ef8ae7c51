// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! Logical column types and runtime values shared by every rowjet crate.

pub use r#type::Type;
pub use value::Value;

mod r#type;
mod value;
