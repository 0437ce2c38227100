//! Lowering errors

use anyhow::Result;
use thiserror::Error;

use crate::{
    id::VarId,
    logic::ast::{AggregatorId, BranchId, RecordId},
};

/// Lowering errors.
///
/// The `Unresolved*`, `DuplicateDefinition`, `DirectiveNotFound` and `InternalError` variants
/// signal broken invariants: earlier analyses are expected to reject programs that would reach
/// them, so they are never user-facing diagnostics.
#[derive(Debug, Eq, Error, PartialEq)]
pub enum Error {
    #[error(
        "An unexpected error occurred while lowering: {0}. This is a bug: please consider filing an issue"
    )]
    InternalError(String),
    #[error("Undefined variable {0}: no location was indexed for it")]
    UnresolvedVariable(VarId),
    #[error("Undefined generator #{}: no location was indexed for it", .0.index())]
    UnresolvedGenerator(AggregatorId),
    #[error("Undefined record #{}: no location was indexed for it", .0.index())]
    UnresolvedRecord(RecordId),
    #[error("Undefined branch #{}: no location was indexed for it", .0.index())]
    UnresolvedBranch(BranchId),
    #[error("Duplicate definition: {0}")]
    DuplicateDefinition(String),
    #[error("I/O directive not found: {0}")]
    DirectiveNotFound(String),
    #[error("Rule has no head")]
    RuleMissingHead,
    #[error("Unsupported argument: {0}")]
    UnsupportedArgument(String),
    #[error("Failed to parse I/O declaration: {0}")]
    IoParseError(String),
}

pub fn error<T>(err: impl std::error::Error + Send + Sync + 'static) -> Result<T> {
    Err(err.into())
}
