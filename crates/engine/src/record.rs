// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use rowjet_type::Value;

/// The caller's structured-record representation: an ordered list of cell
/// values matching some column schema.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Record {
	pub values: Vec<Value>,
}

impl Record {
	pub fn new(values: Vec<Value>) -> Self {
		Self {
			values,
		}
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn get(&self, index: usize) -> Option<&Value> {
		self.values.get(index)
	}
}

impl From<Vec<Value>> for Record {
	fn from(values: Vec<Value>) -> Self {
		Self::new(values)
	}
}

impl FromIterator<Value> for Record {
	fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
		Self::new(iter.into_iter().collect())
	}
}
