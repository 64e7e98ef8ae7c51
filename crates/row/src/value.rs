// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use rowjet_type::{Type, Value};

use crate::{layout::LayoutInner, row::EncodedRow};

impl LayoutInner {
	pub fn set_values(&self, row: &mut EncodedRow, values: &[Value]) {
		debug_assert!(values.len() == self.fields.len());
		for (index, value) in values.iter().enumerate() {
			self.set_value(row, index, value)
		}
	}

	pub fn set_value(&self, row: &mut EncodedRow, index: usize, value: &Value) {
		let field = &self.fields[index];
		match (field.ty, value) {
			(Type::Bool, Value::Bool(v)) => self.set_bool(row, index, *v),
			(Type::Float4, Value::Float4(v)) => self.set_f32(row, index, *v),
			(Type::Float8, Value::Float8(v)) => self.set_f64(row, index, *v),
			(Type::Int1, Value::Int1(v)) => self.set_i8(row, index, *v),
			(Type::Int2, Value::Int2(v)) => self.set_i16(row, index, *v),
			(Type::Int4, Value::Int4(v)) => self.set_i32(row, index, *v),
			(Type::Int8, Value::Int8(v)) => self.set_i64(row, index, *v),
			(Type::Uint1, Value::Uint1(v)) => self.set_u8(row, index, *v),
			(Type::Uint2, Value::Uint2(v)) => self.set_u16(row, index, *v),
			(Type::Uint4, Value::Uint4(v)) => self.set_u32(row, index, *v),
			(Type::Uint8, Value::Uint8(v)) => self.set_u64(row, index, *v),
			(Type::Utf8, Value::Utf8(v)) => self.set_utf8(row, index, v),
			(_, Value::Undefined) => self.set_undefined(row, index),
			(_, _) => unreachable!("value type checked by the caller"),
		}
	}

	pub fn get_value(&self, row: &EncodedRow, index: usize) -> Value {
		if !row.is_defined(index) {
			return Value::Undefined;
		}
		match self.fields[index].ty {
			Type::Bool => Value::Bool(self.get_bool(row, index)),
			Type::Float4 => Value::Float4(self.get_f32(row, index)),
			Type::Float8 => Value::Float8(self.get_f64(row, index)),
			Type::Int1 => Value::Int1(self.get_i8(row, index)),
			Type::Int2 => Value::Int2(self.get_i16(row, index)),
			Type::Int4 => Value::Int4(self.get_i32(row, index)),
			Type::Int8 => Value::Int8(self.get_i64(row, index)),
			Type::Uint1 => Value::Uint1(self.get_u8(row, index)),
			Type::Uint2 => Value::Uint2(self.get_u16(row, index)),
			Type::Uint4 => Value::Uint4(self.get_u32(row, index)),
			Type::Uint8 => Value::Uint8(self.get_u64(row, index)),
			Type::Utf8 => Value::Utf8(self.get_utf8(row, index).to_string()),
			Type::Undefined => Value::Undefined,
		}
	}

	pub fn read_values(&self, row: &EncodedRow) -> Vec<Value> {
		(0..self.fields.len()).map(|index| self.get_value(row, index)).collect()
	}
}
