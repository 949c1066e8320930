//! Update processors - the mutation path
//!
//! Incremental edits to a stored property go through the same three-stage
//! pipeline as the create path: `validate_format` checks the operation is
//! legal for the property's category and well shaped,
//! `validate_business_rules` checks semantic constraints, and
//! `transform_to_db_operations` emits storage mutation instructions.
//!
//! Multi-valued transforms need to know how many rows are currently stored
//! (full replaces and removals must cover every existing position), so the
//! transform stage takes `current_count`, supplied by the executor from the
//! same transaction that applies the result. Single-valued processors
//! ignore it.

mod multi;
mod single;

pub use multi::MultiValueUpdateProcessor;
pub use single::SingleValueUpdateProcessor;

use lodestone_core::{DbOperationResult, IssueId, PropertyDefinition, ValidationResult};
use serde::{Deserialize, Serialize};

/// One update operation on one property of one issue.
///
/// A tagged union rather than a loose payload map: each operation carries
/// exactly the fields it needs, so "missing field" checks disappear at the
/// type level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum UpdateOperation {
    /// Replace the single stored value (single-valued types only)
    Set { value: Option<String> },
    /// Delete all stored rows for the property
    Remove,
    /// Append one element (multi-valued types only)
    Add { value: String },
    /// Atomically replace the entire ordered set (multi-valued types only)
    Update { values: Vec<String> },
}

impl UpdateOperation {
    /// The wire tag of this operation, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            UpdateOperation::Set { .. } => "set",
            UpdateOperation::Remove => "remove",
            UpdateOperation::Add { .. } => "add",
            UpdateOperation::Update { .. } => "update",
        }
    }
}

/// Per-type mutation pipeline.
///
/// Stage order is a contract: callers run `validate_format`, then
/// `validate_business_rules`, then `transform_to_db_operations`, stopping at
/// the first stage that reports `valid: false`. An operation that is illegal
/// for the property's category is a format failure, not an error.
pub trait UpdateProcessor: Send + Sync {
    fn validate_format(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
    ) -> ValidationResult;

    fn validate_business_rules(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
    ) -> ValidationResult;

    /// Turn a validated operation into mutation instructions.
    ///
    /// `current_count` is the number of rows currently stored for this
    /// (issue, property); the executor must read it in the same transaction
    /// that applies the returned instructions.
    fn transform_to_db_operations(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
        issue_id: IssueId,
        current_count: usize,
    ) -> DbOperationResult;
}

// ============================================================================
// TESTS
// ============================================================================
