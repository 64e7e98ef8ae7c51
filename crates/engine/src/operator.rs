// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use tracing::{debug, trace};

use rowjet_catalog::ColumnDef;
use rowjet_jit::{FunctionAddress, JitModuleRegistry};
use rowjet_sql::ProjectNode;

use crate::{EngineError, Record, RowCodec};

/// A per-record streaming operator: opened once, fed records one at a time,
/// closed once. `process` maps exactly one input record to exactly one
/// output record, preserving arrival order.
pub trait MapOperator {
	fn open(&mut self) -> crate::Result<()>;
	fn process(&mut self, record: Record) -> crate::Result<Record>;
	fn close(&mut self) -> crate::Result<()>;
}

/// What a projection operator needs to come alive in an execution context:
/// the compiled function's coordinates and the input/output row schemas.
///
/// Schemas are lists of column lists, concatenated in order, so a producer
/// with several schema segments maps onto one flat codec schema.
#[derive(Clone, Debug)]
pub struct ProjectionConfig {
	pub module_tag: String,
	pub function_name: String,
	/// Compiled module bytes, carried along when the execution context may
	/// not have loaded the module yet.
	pub module_blob: Option<Vec<u8>>,
	pub input_schema: Vec<Vec<ColumnDef>>,
	pub output_schema: Vec<Vec<ColumnDef>>,
}

impl ProjectionConfig {
	/// Derive the config from a compiled projection node: the input schema
	/// is what the node's producer emits, the output schema is the node's
	/// own column list.
	pub fn from_node(node: &ProjectNode, module_blob: Option<Vec<u8>>) -> Self {
		Self {
			module_tag: node.module_tag.clone(),
			function_name: node.function_name.clone(),
			module_blob,
			input_schema: vec![node.input.output_columns().to_vec()],
			output_schema: vec![node.columns.clone()],
		}
	}
}

enum OperatorState {
	Created,
	Opened {
		function: FunctionAddress,
		input_codec: RowCodec,
		output_codec: RowCodec,
	},
	Closed,
}

/// Applies one compiled projection function to a stream of records.
///
/// `open` resolves the module and function once and builds both codecs;
/// `process` then runs encode, invoke, decode per record with no name
/// lookup on the hot path. Closing releases the codecs but never unloads
/// the module, which stays in the registry for the process lifetime.
pub struct StreamingProjectionOperator<'a> {
	config: ProjectionConfig,
	registry: &'a JitModuleRegistry,
	state: OperatorState,
}

impl<'a> StreamingProjectionOperator<'a> {
	pub fn new(config: ProjectionConfig, registry: &'a JitModuleRegistry) -> Self {
		Self {
			config,
			registry,
			state: OperatorState::Created,
		}
	}
}

impl MapOperator for StreamingProjectionOperator<'_> {
	fn open(&mut self) -> crate::Result<()> {
		match self.state {
			OperatorState::Created => {}
			OperatorState::Opened {
				..
			} => return Ok(()),
			OperatorState::Closed => return Err(EngineError::UseAfterClose),
		}

		if let Some(blob) = &self.config.module_blob {
			self.registry.init_module(&self.config.module_tag, blob)?;
		}

		let module = self.registry.get_module(&self.config.module_tag)?;
		let function = module.find_function(&self.config.function_name)?;

		debug!(
			module_tag = %self.config.module_tag,
			function = %self.config.function_name,
			"projection operator opened"
		);

		self.state = OperatorState::Opened {
			function,
			input_codec: RowCodec::new(self.config.input_schema.clone()),
			output_codec: RowCodec::new(self.config.output_schema.clone()),
		};
		Ok(())
	}

	fn process(&mut self, record: Record) -> crate::Result<Record> {
		let OperatorState::Opened {
			function,
			input_codec,
			output_codec,
		} = &self.state
		else {
			return Err(match self.state {
				OperatorState::Created => EngineError::NotOpen,
				_ => EngineError::UseAfterClose,
			});
		};

		let input = input_codec.encode(&record)?;
		let output = function.invoke(&input)?;
		let result = output_codec.decode(&output)?;

		trace!(function = %function.name(), "record projected");
		Ok(result)
	}

	fn close(&mut self) -> crate::Result<()> {
		match std::mem::replace(&mut self.state, OperatorState::Closed) {
			OperatorState::Opened {
				function,
				mut input_codec,
				mut output_codec,
			} => {
				input_codec.release();
				output_codec.release();
				// The function handle is dropped; the module stays loaded
				drop(function);
				debug!(module_tag = %self.config.module_tag, "projection operator closed");
				Ok(())
			}
			OperatorState::Created => Ok(()),
			OperatorState::Closed => Err(EngineError::UseAfterClose),
		}
	}
}
