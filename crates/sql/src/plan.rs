// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

use serde::{Deserialize, Serialize};

use rowjet_catalog::ColumnDef;
use rowjet_type::Type;

/// The physical operator tree produced by a successful compile.
///
/// A pure ownership tree: nodes own their producers by value and carry no
/// parent links. The whole tree is owned by the compile session that
/// produced it and becomes unreachable when the session closes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PhysicalPlan {
	TableScan(TableScanNode),
	Project(ProjectNode),
	Filter(FilterNode),
	Join(JoinNode),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableScanNode {
	pub table: String,
	pub columns: Vec<ColumnDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectNode {
	pub input: Box<PhysicalPlan>,
	pub function_name: String,
	pub module_tag: String,
	pub columns: Vec<ColumnDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterNode {
	pub input: Box<PhysicalPlan>,
	pub function_name: String,
	pub module_tag: String,
	pub columns: Vec<ColumnDef>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct JoinNode {
	pub left: Box<PhysicalPlan>,
	pub right: Box<PhysicalPlan>,
	pub function_name: String,
	pub module_tag: String,
	pub columns: Vec<ColumnDef>,
}

impl PhysicalPlan {
	/// The column schema this node produces, in output order.
	pub fn output_columns(&self) -> &[ColumnDef] {
		match self {
			PhysicalPlan::TableScan(node) => &node.columns,
			PhysicalPlan::Project(node) => &node.columns,
			PhysicalPlan::Filter(node) => &node.columns,
			PhysicalPlan::Join(node) => &node.columns,
		}
	}

	pub fn output_types(&self) -> Vec<Type> {
		self.output_columns().iter().map(|c| c.ty).collect()
	}

	/// Producer (child) nodes, in input order.
	pub fn producers(&self) -> Vec<&PhysicalPlan> {
		match self {
			PhysicalPlan::TableScan(_) => vec![],
			PhysicalPlan::Project(node) => vec![&node.input],
			PhysicalPlan::Filter(node) => vec![&node.input],
			PhysicalPlan::Join(node) => vec![&node.left, &node.right],
		}
	}

	/// Function name and module tag, for nodes backed by compiled code.
	pub fn compiled_function(&self) -> Option<(&str, &str)> {
		match self {
			PhysicalPlan::TableScan(_) => None,
			PhysicalPlan::Project(node) => Some((node.function_name.as_str(), node.module_tag.as_str())),
			PhysicalPlan::Filter(node) => Some((node.function_name.as_str(), node.module_tag.as_str())),
			PhysicalPlan::Join(node) => Some((node.function_name.as_str(), node.module_tag.as_str())),
		}
	}
}
