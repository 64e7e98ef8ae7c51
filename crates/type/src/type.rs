// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// All logical column types understood by the engine.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Bool,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 1-byte unsigned integer
	Uint1,
	/// A 2-byte unsigned integer
	Uint2,
	/// A 4-byte unsigned integer
	Uint4,
	/// An 8-byte unsigned integer
	Uint8,
	/// A UTF-8 encoded text.
	Utf8,
	/// Value is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	pub fn is_number(&self) -> bool {
		matches!(
			self,
			Type::Float4
				| Type::Float8 | Type::Int1
				| Type::Int2 | Type::Int4
				| Type::Int8 | Type::Uint1
				| Type::Uint2 | Type::Uint4
				| Type::Uint8
		)
	}

	pub fn is_bool(&self) -> bool {
		matches!(self, Type::Bool)
	}

	pub fn is_signed_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_unsigned_integer(&self) -> bool {
		matches!(self, Type::Uint1 | Type::Uint2 | Type::Uint4 | Type::Uint8)
	}

	pub fn is_integer(&self) -> bool {
		self.is_signed_integer() || self.is_unsigned_integer()
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}
}

impl Type {
	pub fn to_u8(&self) -> u8 {
		match self {
			Type::Undefined => 0x00,
			Type::Float4 => 0x01,
			Type::Float8 => 0x02,
			Type::Int1 => 0x03,
			Type::Int2 => 0x04,
			Type::Int4 => 0x05,
			Type::Int8 => 0x06,
			Type::Utf8 => 0x08,
			Type::Uint1 => 0x09,
			Type::Uint2 => 0x0A,
			Type::Uint4 => 0x0B,
			Type::Uint8 => 0x0C,
			Type::Bool => 0x0E,
		}
	}

	pub fn from_u8(value: u8) -> Self {
		match value {
			0x00 => Type::Undefined,
			0x01 => Type::Float4,
			0x02 => Type::Float8,
			0x03 => Type::Int1,
			0x04 => Type::Int2,
			0x05 => Type::Int4,
			0x06 => Type::Int8,
			0x08 => Type::Utf8,
			0x09 => Type::Uint1,
			0x0A => Type::Uint2,
			0x0B => Type::Uint4,
			0x0C => Type::Uint8,
			0x0E => Type::Bool,
			_ => unreachable!(),
		}
	}
}

impl Type {
	/// Size of the value's static slot in an encoded row.
	pub fn size(&self) -> usize {
		match self {
			Type::Bool => 1,
			Type::Float4 => 4,
			Type::Float8 => 8,
			Type::Int1 => 1,
			Type::Int2 => 2,
			Type::Int4 => 4,
			Type::Int8 => 8,
			Type::Uint1 => 1,
			Type::Uint2 => 2,
			Type::Uint4 => 4,
			Type::Uint8 => 8,
			Type::Utf8 => 8, // offset: u32 + length: u32
			Type::Undefined => 0,
		}
	}

	pub fn alignment(&self) -> usize {
		match self {
			Type::Bool => 1,
			Type::Float4 => 4,
			Type::Float8 => 8,
			Type::Int1 => 1,
			Type::Int2 => 2,
			Type::Int4 => 4,
			Type::Int8 => 8,
			Type::Uint1 => 1,
			Type::Uint2 => 2,
			Type::Uint4 => 4,
			Type::Uint8 => 8,
			Type::Utf8 => 4, // u32 alignment
			Type::Undefined => 1,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Bool => f.write_str("Bool"),
			Type::Float4 => f.write_str("Float4"),
			Type::Float8 => f.write_str("Float8"),
			Type::Int1 => f.write_str("Int1"),
			Type::Int2 => f.write_str("Int2"),
			Type::Int4 => f.write_str("Int4"),
			Type::Int8 => f.write_str("Int8"),
			Type::Uint1 => f.write_str("Uint1"),
			Type::Uint2 => f.write_str("Uint2"),
			Type::Uint4 => f.write_str("Uint4"),
			Type::Uint8 => f.write_str("Uint8"),
			Type::Utf8 => f.write_str("Utf8"),
			Type::Undefined => f.write_str("Undefined"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::Type;

	const ALL: [Type; 13] = [
		Type::Bool,
		Type::Float4,
		Type::Float8,
		Type::Int1,
		Type::Int2,
		Type::Int4,
		Type::Int8,
		Type::Uint1,
		Type::Uint2,
		Type::Uint4,
		Type::Uint8,
		Type::Utf8,
		Type::Undefined,
	];

	#[test]
	fn test_wire_code_round_trip() {
		for ty in ALL {
			assert_eq!(Type::from_u8(ty.to_u8()), ty);
		}
	}

	#[test]
	fn test_size_covers_alignment() {
		for ty in ALL {
			if ty == Type::Undefined {
				continue;
			}
			assert!(ty.size() >= ty.alignment(), "{ty}");
			assert!(ty.size() % ty.alignment() == 0, "{ty}");
		}
	}
}
