// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::{ops::Deref, sync::Arc};

use rowjet_type::Type;

use crate::row::EncodedRow;

#[derive(Debug, Clone)]
pub struct Layout(Arc<LayoutInner>);

impl Deref for Layout {
	type Target = LayoutInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl Layout {
	pub fn new(kinds: &[Type]) -> Self {
		Self(Arc::new(LayoutInner::new(kinds)))
	}
}

#[derive(Debug)]
pub struct LayoutInner {
	pub fields: Vec<Field>,
	/// size of the static section in bytes
	pub static_section_size: usize,
	/// size of the bitmap part in bytes
	pub bitmap_size: usize,
	pub alignment: usize,
}

#[derive(Debug)]
pub struct Field {
	pub offset: usize,
	pub size: usize,
	pub align: usize,
	pub ty: Type,
}

impl LayoutInner {
	fn new(kinds: &[Type]) -> Self {
		assert!(!kinds.is_empty());

		let num_fields = kinds.len();
		let bitmap_bytes = (num_fields + 7) / 8;

		let mut offset = bitmap_bytes;
		let mut fields = Vec::with_capacity(num_fields);
		let mut max_align = 1;

		for &ty in kinds {
			let size = ty.size();
			let align = ty.alignment();

			offset = align_up(offset, align);
			fields.push(Field {
				offset,
				size,
				align,
				ty,
			});

			offset += size;
			max_align = max_align.max(align);
		}

		let static_section_size = align_up(offset, max_align);

		LayoutInner {
			fields,
			static_section_size,
			alignment: max_align,
			bitmap_size: bitmap_bytes,
		}
	}

	/// Allocate a zeroed row: all fields undefined, empty dynamic section.
	pub fn allocate_row(&self) -> EncodedRow {
		EncodedRow(vec![0u8; self.total_static_size()])
	}

	pub const fn data_offset(&self) -> usize {
		self.bitmap_size
	}

	pub const fn total_static_size(&self) -> usize {
		self.static_section_size
	}

	pub const fn dynamic_section_start(&self) -> usize {
		self.static_section_size
	}

	pub fn dynamic_section_size(&self, row: &EncodedRow) -> usize {
		row.len().saturating_sub(self.total_static_size())
	}

	pub fn all_defined(&self, row: &EncodedRow) -> bool {
		(0..self.fields.len()).all(|index| row.is_defined(index))
	}

	pub fn field_type(&self, index: usize) -> Type {
		self.fields[index].ty
	}
}

fn align_up(offset: usize, align: usize) -> usize {
	(offset + align - 1) & !(align - 1)
}
