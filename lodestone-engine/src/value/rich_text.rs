//! Rich text property value processor

use super::{coerce_scalar, is_unset, number_projection, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, PropertyDefinition, SingleValueRecord, ValidationResult,
};
use serde_json::Value;

/// Create-path processor for rich text (markdown) properties.
///
/// Format is identical to plain text. The only business rule is a maximum
/// length; rich text has no minimum and no pattern.
pub struct RichTextValueProcessor {
    fallback_max_length: usize,
}

impl RichTextValueProcessor {
    pub fn new(fallback_max_length: usize) -> Self {
        Self {
            fallback_max_length,
        }
    }
}

impl ValueProcessor for RichTextValueProcessor {
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
            return ValidationResult::ok();
        };

        let max = definition
            .config
            .max_length
            .unwrap_or(self.fallback_max_length);
        if value.chars().count() > max {
            return ValidationResult::fail(format!(
                "Property '{}' exceeds the maximum length of {} characters",
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
