//! Text property value processor

use super::{coerce_scalar, is_unset, number_projection, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, PropertyDefinition, SingleValueRecord, ValidationResult,
};
use regex::Regex;
use serde_json::Value;

/// Create-path processor for plain text properties.
///
/// Format: any string-coercible scalar, or null when the definition is
/// nullable. Business rules: min/max length bounds and an optional regex
/// pattern from the property config.
pub struct TextValueProcessor {
    /// Applied when the property config carries no max_length
    fallback_max_length: usize,
}

impl TextValueProcessor {
    pub fn new(fallback_max_length: usize) -> Self {
        Self {
            fallback_max_length,
        }
    }

    fn max_length(&self, definition: &PropertyDefinition) -> usize {
        definition
            .config
            .max_length
            .unwrap_or(self.fallback_max_length)
    }
}

impl ValueProcessor for TextValueProcessor {
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult {
        if is_unset(raw) {
            if definition.nullable {
                return ValidationResult::ok();
            }
            return ValidationResult::fail(format!(
                "Property '{}' is not nullable",
                definition.name
            ));
        }

        if coerce_scalar(raw).is_none() {
            return ValidationResult::fail(format!(
                "Property '{}' expects a text value",
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
        let Some(value) = coerce_scalar(raw) else {
            // Unset and format-accepted; nothing to check.
            return ValidationResult::ok();
        };

        let length = value.chars().count();

        if let Some(min) = definition.config.min_length {
            if length < min {
                return ValidationResult::fail(format!(
                    "Property '{}' requires at least {} characters",
                    definition.name, min
                ));
            }
        }

        let max = self.max_length(definition);
        if length > max {
            return ValidationResult::fail(format!(
                "Property '{}' exceeds the maximum length of {} characters",
                definition.name, max
            ));
        }

        if let Some(pattern) = &definition.config.pattern {
            match Regex::new(pattern) {
                Ok(re) => {
                    if !re.is_match(&value) {
                        return ValidationResult::fail(format!(
                            "Property '{}' does not match the required pattern",
                            definition.name
                        ));
                    }
                }
                Err(_) => {
                    return ValidationResult::fail(format!(
                        "Property '{}' has an invalid pattern configured",
                        definition.name
                    ));
                }
            }
        }

        ValidationResult::ok()
    }

    fn transform_to_db(
        &self,
        definition: &PropertyDefinition,
        raw: &Value,
        issue_id: IssueId,
    ) -> DbInsertData {
        let value = coerce_scalar(raw);
        let number_value = value.as_deref().and_then(number_projection);
        DbInsertData::single(SingleValueRecord {
            issue_id,
            property_id: definition.property_id,
            property_type: definition.property_type,
            value,
            number_value,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
