// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::ops::Deref;

/// One encoded record: `[bitmap][static values][dynamic values]`.
///
/// The buffer owns its bytes; crossing the invocation boundary works on the
/// raw byte slice and builds a fresh `EncodedRow` on the way back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedRow(pub Vec<u8>);

impl Deref for EncodedRow {
	type Target = [u8];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl EncodedRow {
	pub fn as_slice(&self) -> &[u8] {
		&self.0
	}

	pub fn make_mut(&mut self) -> &mut [u8] {
		&mut self.0
	}

	pub fn into_vec(self) -> Vec<u8> {
		self.0
	}

	#[inline]
	pub fn is_defined(&self, index: usize) -> bool {
		let byte = index / 8;
		let bit = index % 8;
		(self.0[byte] & (1 << bit)) != 0
	}

	pub(crate) fn set_valid(&mut self, index: usize, valid: bool) {
		let byte = index / 8;
		let bit = index % 8;
		if valid {
			self.0[byte] |= 1 << bit;
		} else {
			self.0[byte] &= !(1 << bit);
		}
	}
}

impl From<Vec<u8>> for EncodedRow {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

#[cfg(test)]
mod tests {
	use super::EncodedRow;

	#[test]
	fn test_bitmap_bits() {
		let mut row = EncodedRow(vec![0u8; 2]);
		assert!(!row.is_defined(0));
		row.set_valid(0, true);
		row.set_valid(9, true);
		assert!(row.is_defined(0));
		assert!(row.is_defined(9));
		assert!(!row.is_defined(1));
		row.set_valid(0, false);
		assert!(!row.is_defined(0));
	}
}
