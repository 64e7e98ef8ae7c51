// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::ptr;

use rowjet_type::Type;

use crate::{layout::LayoutInner, row::EncodedRow};

impl LayoutInner {
	pub fn set_bool(&self, row: &mut EncodedRow, index: usize, value: bool) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Bool);
		row.set_valid(index, true);
		row.make_mut()[field.offset] = value as u8;
	}

	pub fn set_f32(&self, row: &mut EncodedRow, index: usize, value: f32) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Float4);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut f32, value) }
	}

	pub fn set_f64(&self, row: &mut EncodedRow, index: usize, value: f64) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Float8);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut f64, value) }
	}

	pub fn set_i8(&self, row: &mut EncodedRow, index: usize, value: i8) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int1);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut i8, value) }
	}

	pub fn set_i16(&self, row: &mut EncodedRow, index: usize, value: i16) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int2);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut i16, value) }
	}

	pub fn set_i32(&self, row: &mut EncodedRow, index: usize, value: i32) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int4);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut i32, value) }
	}

	pub fn set_i64(&self, row: &mut EncodedRow, index: usize, value: i64) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Int8);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut i64, value) }
	}

	pub fn set_u8(&self, row: &mut EncodedRow, index: usize, value: u8) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint1);
		row.set_valid(index, true);
		row.make_mut()[field.offset] = value;
	}

	pub fn set_u16(&self, row: &mut EncodedRow, index: usize, value: u16) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint2);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut u16, value) }
	}

	pub fn set_u32(&self, row: &mut EncodedRow, index: usize, value: u32) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint4);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut u32, value) }
	}

	pub fn set_u64(&self, row: &mut EncodedRow, index: usize, value: u64) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Uint8);
		row.set_valid(index, true);
		unsafe { ptr::write_unaligned(row.make_mut().as_mut_ptr().add(field.offset) as *mut u64, value) }
	}

	pub fn set_utf8(&self, row: &mut EncodedRow, index: usize, value: &str) {
		let field = &self.fields[index];
		debug_assert_eq!(field.ty, Type::Utf8);
		debug_assert!(!row.is_defined(index), "Utf8 field {} already set", index);

		let bytes = value.as_bytes();

		// Offset is relative to the start of the dynamic section
		let dynamic_offset = self.dynamic_section_size(row);

		row.0.extend_from_slice(bytes);

		// Update reference in static section: [offset: u32][length: u32]
		let ref_slice = &mut row.make_mut()[field.offset..field.offset + 8];
		ref_slice[0..4].copy_from_slice(&(dynamic_offset as u32).to_le_bytes());
		ref_slice[4..8].copy_from_slice(&(bytes.len() as u32).to_le_bytes());

		row.set_valid(index, true);
	}

	pub fn set_undefined(&self, row: &mut EncodedRow, index: usize) {
		row.set_valid(index, false);
	}
}
