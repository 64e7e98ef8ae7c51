// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use rowjet_catalog::ColumnDef;
use rowjet_row::{EncodedRow, Layout};

use crate::{EncodingError, EngineError, Record};

/// Converts between [`Record`]s and the engine's internal binary row
/// format, for a fixed ordered column schema.
///
/// Constructed from one or more column-schema lists which are concatenated
/// in order. A codec is opened once per execution context and released when
/// the stream ends; encoding or decoding through a released codec is a
/// programming error.
pub struct RowCodec {
	columns: Vec<ColumnDef>,
	layout: Layout,
	released: bool,
}

impl RowCodec {
	pub fn new(schema_lists: Vec<Vec<ColumnDef>>) -> Self {
		let columns: Vec<ColumnDef> = schema_lists.into_iter().flatten().collect();
		Self::from_columns(columns)
	}

	pub fn from_columns(columns: Vec<ColumnDef>) -> Self {
		let types: Vec<_> = columns.iter().map(|c| c.ty).collect();
		Self {
			layout: Layout::new(&types),
			columns,
			released: false,
		}
	}

	pub fn columns(&self) -> &[ColumnDef] {
		&self.columns
	}

	/// Encode an external record into an internal row, applying each
	/// column's declared type and nullability in schema order.
	pub fn encode(&self, record: &Record) -> crate::Result<EncodedRow> {
		self.ensure_open()?;

		if record.len() != self.columns.len() {
			return Err(EncodingError::ColumnCountMismatch {
				expected: self.columns.len(),
				actual: record.len(),
			}
			.into());
		}

		let mut row = self.layout.allocate_row();
		for (index, (column, value)) in self.columns.iter().zip(record.values.iter()).enumerate() {
			if value.is_undefined() {
				if !column.nullable {
					return Err(EncodingError::NullabilityViolation {
						column: column.name.clone(),
					}
					.into());
				}
				self.layout.set_undefined(&mut row, index);
				continue;
			}

			if value.type_of() != column.ty {
				return Err(EncodingError::TypeMismatch {
					column: column.name.clone(),
					expected: column.ty,
					actual: value.type_of(),
				}
				.into());
			}

			self.layout.set_value(&mut row, index, value);
		}

		Ok(row)
	}

	/// Decode an internal row back into an external record. Exact inverse
	/// of [`encode`](Self::encode) for rows valid under this schema.
	pub fn decode(&self, row: &EncodedRow) -> crate::Result<Record> {
		self.ensure_open()?;
		Ok(Record::new(self.layout.read_values(row)))
	}

	pub fn release(&mut self) {
		self.released = true;
	}

	fn ensure_open(&self) -> crate::Result<()> {
		if self.released {
			return Err(EngineError::UseAfterClose);
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use rowjet_catalog::ColumnDef;
	use rowjet_type::{Type, Value};

	use super::RowCodec;
	use crate::{EncodingError, EngineError, Record};

	fn codec() -> RowCodec {
		RowCodec::from_columns(vec![
			ColumnDef::not_null("a", Type::Int4),
			ColumnDef::new("b", Type::Utf8),
			ColumnDef::new("c", Type::Bool),
		])
	}

	#[test]
	fn test_round_trip() {
		let codec = codec();
		let record = Record::new(vec![Value::Int4(5), Value::Utf8("abc".into()), Value::Bool(true)]);

		let row = codec.encode(&record).unwrap();
		assert_eq!(codec.decode(&row).unwrap(), record);
	}

	#[test]
	fn test_round_trip_with_null() {
		let codec = codec();
		let record = Record::new(vec![Value::Int4(0), Value::Undefined, Value::Bool(false)]);

		let row = codec.encode(&record).unwrap();
		assert_eq!(codec.decode(&row).unwrap(), record);
	}

	#[test]
	fn test_schema_lists_concatenate_in_order() {
		let codec = RowCodec::new(vec![
			vec![ColumnDef::new("a", Type::Int4)],
			vec![ColumnDef::new("b", Type::Utf8), ColumnDef::new("c", Type::Int8)],
		]);

		let names: Vec<_> = codec.columns().iter().map(|c| c.name.as_str()).collect();
		assert_eq!(names, vec!["a", "b", "c"]);
	}

	#[test]
	fn test_type_mismatch() {
		let codec = codec();
		let record = Record::new(vec![Value::Utf8("5".into()), Value::Undefined, Value::Bool(true)]);

		let err = codec.encode(&record).unwrap_err();
		assert!(matches!(err, EngineError::Encoding(EncodingError::TypeMismatch { .. })));
	}

	#[test]
	fn test_null_in_non_nullable_column() {
		let codec = codec();
		let record = Record::new(vec![Value::Undefined, Value::Undefined, Value::Bool(true)]);

		let err = codec.encode(&record).unwrap_err();
		assert!(matches!(err, EngineError::Encoding(EncodingError::NullabilityViolation { .. })));
	}

	#[test]
	fn test_column_count_mismatch() {
		let codec = codec();
		let record = Record::new(vec![Value::Int4(1)]);

		let err = codec.encode(&record).unwrap_err();
		assert!(matches!(err, EngineError::Encoding(EncodingError::ColumnCountMismatch { .. })));
	}

	#[test]
	fn test_use_after_release() {
		let mut codec = codec();
		codec.release();

		let record = Record::new(vec![Value::Int4(1), Value::Undefined, Value::Bool(true)]);
		assert!(matches!(codec.encode(&record).unwrap_err(), EngineError::UseAfterClose));
	}
}
