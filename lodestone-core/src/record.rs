//! Storage write instructions and validation results
//!
//! The engine never touches storage itself. Create-path processors emit
//! `DbInsertData` and update-path processors emit `DbOperationResult`; an
//! external executor applies whichever instruction sets are present and
//! discards the value.

use crate::{IssueId, PropertyId, PropertyType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// STORED ROWS
// ============================================================================

/// One stored row of a single-valued property. At most one per
/// (issue, property).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleValueRecord {
    pub issue_id: IssueId,
    pub property_id: PropertyId,
    pub property_type: PropertyType,
    /// Stored value; `None` only for nullable properties
    pub value: Option<String>,
    /// Numeric projection of the value, when it parses as a number
    pub number_value: Option<f64>,
}

/// One stored row of a multi-valued property. Zero or more per
/// (issue, property).
///
/// `position` is a dense, zero-based ordering key. Consumers must treat it
/// as the array index of the value, not as a stable identifier across edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiValueRecord {
    pub issue_id: IssueId,
    pub property_id: PropertyId,
    pub property_type: PropertyType,
    pub value: Option<String>,
    pub number_value: Option<f64>,
    pub position: i32,
}

/// A value to append to a multi-valued property.
///
/// Carries no position on purpose. The executor must assign
/// `current_max_position + 1` read-and-incremented atomically with the
/// insert, under a lock or transaction scoped to (issue, property).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendRecord {
    pub issue_id: IssueId,
    pub property_id: PropertyId,
    pub property_type: PropertyType,
    pub value: Option<String>,
    pub number_value: Option<f64>,
}

// ============================================================================
// VALIDATION RESULT
// ============================================================================

/// Outcome of one validation stage.
///
/// Validation failures are data, not errors: processors return this value
/// and never panic or throw on bad user input. Each stage reports the first
/// failing rule only, so `errors` holds at most one message per stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing result with one message.
    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            errors: vec![message.into()],
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

// ============================================================================
// CREATE-PATH INSTRUCTIONS
// ============================================================================

/// Insert instructions produced by the create path.
///
/// Single-valued types fill `single_values` with exactly one record;
/// multi-valued types fill `multi_values` with one record per input element,
/// `position` equal to the element's input index. An empty `multi_values` is
/// a valid outcome for absent input, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbInsertData {
    #[serde(default)]
    pub single_values: Vec<SingleValueRecord>,
    #[serde(default)]
    pub multi_values: Vec<MultiValueRecord>,
}

impl DbInsertData {
    /// Insert data for one single-valued record.
    pub fn single(record: SingleValueRecord) -> Self {
        Self {
            single_values: vec![record],
            multi_values: Vec::new(),
        }
    }

    /// Insert data for an ordered set of multi-valued records.
    pub fn multi(records: Vec<MultiValueRecord>) -> Self {
        Self {
            single_values: Vec::new(),
            multi_values: records,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.single_values.is_empty() && self.multi_values.is_empty()
    }
}

// ============================================================================
// UPDATE-PATH INSTRUCTIONS
// ============================================================================

/// Mutation instructions produced by the update path.
///
/// Each field is an independent instruction set; the executor applies
/// whichever are present. A remove+create pair from a full-replace UPDATE
/// must be applied as one atomic unit per (issue, property), otherwise the
/// position invariant (unique, contiguous, zero-based) is corrupted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DbOperationResult {
    /// Delete the stored single-value row
    #[serde(default)]
    pub single_value_remove: bool,
    /// Replace the stored single-value row
    pub single_value_update: Option<SingleValueRecord>,
    /// Positions of multi-value rows to delete
    #[serde(default)]
    pub multi_value_remove_positions: Vec<i32>,
    /// In-place updates of multi-value rows, keyed by position
    #[serde(default)]
    pub multi_value_updates: BTreeMap<i32, MultiValueRecord>,
    /// New multi-value rows with known positions (full-replace path)
    #[serde(default)]
    pub multi_value_creates: Vec<MultiValueRecord>,
    /// One value to append; the executor assigns the next position
    pub multi_value_append: Option<AppendRecord>,
}

impl DbOperationResult {
    /// Whether this result carries no instructions at all.
    pub fn is_noop(&self) -> bool {
        !self.single_value_remove
            && self.single_value_update.is_none()
            && self.multi_value_remove_positions.is_empty()
            && self.multi_value_updates.is_empty()
            && self.multi_value_creates.is_empty()
            && self.multi_value_append.is_none()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::new_issue_id;

    fn sample_single() -> SingleValueRecord {
        SingleValueRecord {
            issue_id: new_issue_id(),
            property_id: crate::new_property_id(),
            property_type: PropertyType::Text,
            value: Some("hello".to_string()),
            number_value: None,
        }
    }

    #[test]
    fn test_validation_result_constructors() {
        let ok = ValidationResult::ok();
        assert!(ok.is_valid());
        assert!(ok.errors.is_empty());

        let fail = ValidationResult::fail("bad value");
        assert!(!fail.is_valid());
        assert_eq!(fail.errors, vec!["bad value".to_string()]);
    }

    #[test]
    fn test_insert_data_single() {
        let data = DbInsertData::single(sample_single());
        assert_eq!(data.single_values.len(), 1);
        assert!(data.multi_values.is_empty());
        assert!(!data.is_empty());
    }

    #[test]
    fn test_insert_data_empty_multi_is_valid() {
        let data = DbInsertData::multi(Vec::new());
        assert!(data.is_empty());
    }

    #[test]
    fn test_operation_result_default_is_noop() {
        let result = DbOperationResult::default();
        assert!(result.is_noop());
    }

    #[test]
    fn test_operation_result_with_remove_is_not_noop() {
        let result = DbOperationResult {
            single_value_remove: true,
            ..Default::default()
        };
        assert!(!result.is_noop());
    }

    #[test]
    fn test_operation_result_with_append_is_not_noop() {
        let result = DbOperationResult {
            multi_value_append: Some(AppendRecord {
                issue_id: new_issue_id(),
                property_id: crate::new_property_id(),
                property_type: PropertyType::Miners,
                value: Some("rig-7".to_string()),
                number_value: None,
            }),
            ..Default::default()
        };
        assert!(!result.is_noop());
    }
}
