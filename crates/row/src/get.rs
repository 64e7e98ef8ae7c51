// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::ptr;

use rowjet_type::Type;

use crate::{layout::LayoutInner, row::EncodedRow};

impl LayoutInner {
	pub fn get_bool(&self, row: &EncodedRow, index: usize) -> bool {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Bool);
		row.as_slice()[field.offset] != 0
	}

	pub fn get_f32(&self, row: &EncodedRow, index: usize) -> f32 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Float4);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const f32) }
	}

	pub fn get_f64(&self, row: &EncodedRow, index: usize) -> f64 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Float8);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const f64) }
	}

	pub fn get_i8(&self, row: &EncodedRow, index: usize) -> i8 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int1);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const i8) }
	}

	pub fn get_i16(&self, row: &EncodedRow, index: usize) -> i16 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int2);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const i16) }
	}

	pub fn get_i32(&self, row: &EncodedRow, index: usize) -> i32 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int4);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const i32) }
	}

	pub fn get_i64(&self, row: &EncodedRow, index: usize) -> i64 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int8);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const i64) }
	}

	pub fn get_u8(&self, row: &EncodedRow, index: usize) -> u8 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint1);
		row.as_slice()[field.offset]
	}

	pub fn get_u16(&self, row: &EncodedRow, index: usize) -> u16 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint2);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const u16) }
	}

	pub fn get_u32(&self, row: &EncodedRow, index: usize) -> u32 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint4);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const u32) }
	}

	pub fn get_u64(&self, row: &EncodedRow, index: usize) -> u64 {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint8);
		unsafe { ptr::read_unaligned(row.as_ptr().add(field.offset) as *const u64) }
	}

	pub fn get_utf8<'a>(&self, row: &'a EncodedRow, index: usize) -> &'a str {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Utf8);

		// Read [offset: u32][length: u32] from the static slot
		let ref_slice = &row.as_slice()[field.offset..field.offset + 8];
		let offset = u32::from_le_bytes([ref_slice[0], ref_slice[1], ref_slice[2], ref_slice[3]]) as usize;
		let length = u32::from_le_bytes([ref_slice[4], ref_slice[5], ref_slice[6], ref_slice[7]]) as usize;

		let start = self.dynamic_section_start() + offset;
		let bytes = &row.as_slice()[start..start + length];

		// Payload was written from a &str, so it is valid UTF-8
		unsafe { std::str::from_utf8_unchecked(bytes) }
	}
}

#[cfg(test)]
mod tests {
	use rowjet_type::Type;

	use crate::Layout;

	#[test]
	fn test_numeric_round_trip() {
		let layout = Layout::new(&[Type::Int1, Type::Int2, Type::Int4, Type::Int8, Type::Float8]);
		let mut row = layout.allocate_row();

		layout.set_i8(&mut row, 0, -1);
		layout.set_i16(&mut row, 1, -300);
		layout.set_i32(&mut row, 2, 1 << 20);
		layout.set_i64(&mut row, 3, i64::MIN);
		layout.set_f64(&mut row, 4, 3.5);

		assert_eq!(layout.get_i8(&row, 0), -1);
		assert_eq!(layout.get_i16(&row, 1), -300);
		assert_eq!(layout.get_i32(&row, 2), 1 << 20);
		assert_eq!(layout.get_i64(&row, 3), i64::MIN);
		assert_eq!(layout.get_f64(&row, 4), 3.5);
	}

	#[test]
	fn test_unsigned_round_trip() {
		let layout = Layout::new(&[Type::Uint1, Type::Uint2, Type::Uint4, Type::Uint8]);
		let mut row = layout.allocate_row();

		layout.set_u8(&mut row, 0, 255);
		layout.set_u16(&mut row, 1, 65535);
		layout.set_u32(&mut row, 2, 7);
		layout.set_u64(&mut row, 3, u64::MAX);

		assert_eq!(layout.get_u8(&row, 0), 255);
		assert_eq!(layout.get_u16(&row, 1), 65535);
		assert_eq!(layout.get_u32(&row, 2), 7);
		assert_eq!(layout.get_u64(&row, 3), u64::MAX);
	}

	#[test]
	fn test_empty_utf8() {
		let layout = Layout::new(&[Type::Utf8]);
		let mut row = layout.allocate_row();

		layout.set_utf8(&mut row, 0, "");
		assert_eq!(layout.get_utf8(&row, 0), "");
	}

	#[test]
	fn test_mixed_static_and_dynamic() {
		let layout = Layout::new(&[Type::Bool, Type::Utf8, Type::Int4]);
		let mut row = layout.allocate_row();

		layout.set_bool(&mut row, 0, true);
		layout.set_utf8(&mut row, 1, "abc");
		layout.set_i32(&mut row, 2, -5);

		assert!(layout.get_bool(&row, 0));
		assert_eq!(layout.get_utf8(&row, 1), "abc");
		assert_eq!(layout.get_i32(&row, 2), -5);
	}
}
