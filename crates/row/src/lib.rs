// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! The engine's internal binary row encoding.
//!
//! A row is laid out as `[bitmap][static values][dynamic values]`: a leading
//! null bitmap with one bit per field, an aligned static section holding
//! fixed-size values (and `[offset, len]` references for variable-size
//! ones), and a trailing dynamic section holding the variable-size payloads.

pub use layout::{Field, Layout};
pub use row::EncodedRow;

mod get;
mod layout;
mod row;
mod set;
mod value;
