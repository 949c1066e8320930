//! Miners list property value processor

use super::{coerce_scalar_array, find_duplicate, is_unset, number_projection, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, MultiValueRecord, PropertyDefinition, ValidationResult,
};
use serde_json::Value;

/// Create-path processor for miners list properties.
///
/// A miners property holds an ordered list of miner inventory references.
/// Shape and cardinality rules match multi-select, but there is no option
/// membership check: the inventory lives in an external system, and
/// existence is verified there, not here.
pub struct MinersValueProcessor {
    fallback_max_select: usize,
}

impl MinersValueProcessor {
    pub fn new(fallback_max_select: usize) -> Self {
        Self {
            fallback_max_select,
        }
    }
}

impl ValueProcessor for MinersValueProcessor {
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult {
        if is_unset(raw) {
            return ValidationResult::ok();
        }

        if coerce_scalar_array(raw).is_none() {
            return ValidationResult::fail(format!(
                "Property '{}' expects an array of miner ids",
                definition.name
            ));
        }

        ValidationResult::ok()
    }

    fn validate_business_rules(
        &self,
        definition: &PropertyDefinition,
        raw: &Value,
    ) -> ValidationResult {
        let Some(values) = coerce_scalar_array(raw) else {
            return ValidationResult::ok();
        };

        if let Some(dup) = find_duplicate(&values) {
            return ValidationResult::fail(format!(
                "Duplicate miner '{}' for property '{}'",
                dup, definition.name
            ));
        }

        let max = definition
            .config
            .max_select
            .unwrap_or(self.fallback_max_select);
        if values.len() > max {
            return ValidationResult::fail(format!(
                "Property '{}' exceeds the maximum of {} miners",
                definition.name, max
            ));
        }

        ValidationResult::ok()
    }

    fn transform_to_db(
        &self,
        definition: &PropertyDefinition,
        raw: &Value,
        issue_id: IssueId,
    ) -> DbInsertData {
        let values = coerce_scalar_array(raw).unwrap_or_default();
        let records = values
            .into_iter()
            .enumerate()
            .map(|(position, value)| MultiValueRecord {
                issue_id,
                property_id: definition.property_id,
                property_type: definition.property_type,
                number_value: number_projection(&value),
                value: Some(value),
                position: position as i32,
            })
            .collect();
        DbInsertData::multi(records)
    }
}
