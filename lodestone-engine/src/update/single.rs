//! Update processor for single-valued properties

use super::{UpdateOperation, UpdateProcessor};
use crate::value::number_projection;
use lodestone_core::{
    DbOperationResult, IssueId, PropertyDefinition, PropertyType, SingleValueRecord,
    ValidationResult,
};

/// Mutation processor shared by all single-valued property types
/// (text, rich_text, select, user).
///
/// Legal operations: SET replaces the one stored value, REMOVE deletes it.
/// Type-specific rules hook in per the wrapped `PropertyType`: a text title
/// may not be blanked, and a select value must be a configured option.
pub struct SingleValueUpdateProcessor {
    kind: PropertyType,
}

impl SingleValueUpdateProcessor {
    pub fn new(kind: PropertyType) -> Self {
        debug_assert!(kind.is_single_valued());
        Self { kind }
    }
}

impl UpdateProcessor for SingleValueUpdateProcessor {
    fn validate_format(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
    ) -> ValidationResult {
        match operation {
            UpdateOperation::Set { value } => {
                let nullable_checked =
                    matches!(self.kind, PropertyType::Text | PropertyType::RichText);
                if value.is_none() && !definition.nullable && nullable_checked {
                    return ValidationResult::fail(format!(
                        "Property '{}' is not nullable",
                        definition.name
                    ));
                }
                ValidationResult::ok()
            }
            UpdateOperation::Remove => ValidationResult::ok(),
            other => ValidationResult::fail(format!(
                "Operation '{}' is not supported for single-valued property '{}'",
                other.kind(),
                definition.name
            )),
        }
    }

    fn validate_business_rules(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
    ) -> ValidationResult {
        let UpdateOperation::Set { value } = operation else {
            return ValidationResult::ok();
        };

        match self.kind {
            PropertyType::Text => {
                let blank = value.as_deref().map(|v| v.trim().is_empty()).unwrap_or(true);
                if definition.is_title && blank {
                    return ValidationResult::fail(format!(
                        "Title property '{}' cannot be empty",
                        definition.name
                    ));
                }
            }
            PropertyType::Select => {
                if let Some(v) = value.as_deref() {
                    if !v.is_empty() && !definition.config.contains_option(v) {
                        return ValidationResult::fail(format!(
                            "'{}' is not a valid option for property '{}'",
                            v, definition.name
                        ));
                    }
                }
            }
            // rich_text and user carry no update-time business rules
            _ => {}
        }

        ValidationResult::ok()
    }

    fn transform_to_db_operations(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
        issue_id: IssueId,
        _current_count: usize,
    ) -> DbOperationResult {
        match operation {
            UpdateOperation::Set { value } => {
                let number_value = value.as_deref().and_then(number_projection);
                DbOperationResult {
                    single_value_update: Some(SingleValueRecord {
                        issue_id,
                        property_id: definition.property_id,
                        property_type: definition.property_type,
                        value: value.clone(),
                        number_value,
                    }),
                    ..Default::default()
                }
            }
            UpdateOperation::Remove => DbOperationResult {
                single_value_remove: true,
                ..Default::default()
            },
            // Unreachable after a passing validate_format; emit nothing.
            _ => DbOperationResult::default(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
