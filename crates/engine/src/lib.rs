// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 RowJet

//! The execution side of rowjet: the compile-session lifecycle and the
//! streaming operator that applies compiled functions record by record.
//!
//! A [`CompileSession`] turns SQL text plus a schema catalog into a physical
//! plan and compile metadata, and owns everything the compile allocated
//! until it is closed. A [`StreamingProjectionOperator`] binds one compiled
//! function and, per record, runs decode → invoke → encode through a pair
//! of [`RowCodec`]s.

pub use codec::RowCodec;
pub use error::{EncodingError, EngineError};
pub use operator::{MapOperator, ProjectionConfig, StreamingProjectionOperator};
pub use record::Record;
pub use session::CompileSession;

mod codec;
mod error;
mod operator;
mod record;
mod session;

pub type Result<T> = std::result::Result<T, EngineError>;
