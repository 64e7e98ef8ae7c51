// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Type;

/// A runtime cell value, one variant per logical [`Type`].
///
/// `Undefined` plays the role null plays in most languages: a value that is
/// absent regardless of the column's declared type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Value {
	Bool(bool),
	Float4(f32),
	Float8(f64),
	Int1(i8),
	Int2(i16),
	Int4(i32),
	Int8(i64),
	Uint1(u8),
	Uint2(u16),
	Uint4(u32),
	Uint8(u64),
	Utf8(String),
	Undefined,
}

impl Value {
	pub fn type_of(&self) -> Type {
		match self {
			Value::Bool(_) => Type::Bool,
			Value::Float4(_) => Type::Float4,
			Value::Float8(_) => Type::Float8,
			Value::Int1(_) => Type::Int1,
			Value::Int2(_) => Type::Int2,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Uint1(_) => Type::Uint1,
			Value::Uint2(_) => Type::Uint2,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Utf8(_) => Type::Utf8,
			Value::Undefined => Type::Undefined,
		}
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Bool(v) => Display::fmt(v, f),
			Value::Float4(v) => Display::fmt(v, f),
			Value::Float8(v) => Display::fmt(v, f),
			Value::Int1(v) => Display::fmt(v, f),
			Value::Int2(v) => Display::fmt(v, f),
			Value::Int4(v) => Display::fmt(v, f),
			Value::Int8(v) => Display::fmt(v, f),
			Value::Uint1(v) => Display::fmt(v, f),
			Value::Uint2(v) => Display::fmt(v, f),
			Value::Uint4(v) => Display::fmt(v, f),
			Value::Uint8(v) => Display::fmt(v, f),
			Value::Utf8(v) => f.write_str(v),
			Value::Undefined => f.write_str("undefined"),
		}
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Utf8(value.to_string())
	}
}

#[cfg(test)]
mod tests {
	use super::Value;
	use crate::Type;

	#[test]
	fn test_type_of() {
		assert_eq!(Value::Int4(1).type_of(), Type::Int4);
		assert_eq!(Value::Utf8("x".into()).type_of(), Type::Utf8);
		assert_eq!(Value::Undefined.type_of(), Type::Undefined);
	}

	#[test]
	fn test_undefined() {
		assert!(Value::Undefined.is_undefined());
		assert!(!Value::Bool(false).is_undefined());
	}
}
