//! Single-select property value processor

use super::{coerce_scalar, is_unset_or_blank, number_projection, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, PropertyDefinition, SingleValueRecord, ValidationResult,
};
use serde_json::Value;

/// Create-path processor for single-select properties.
///
/// Null or empty-string input is the "unset" shape and is accepted
/// unconditionally, regardless of the nullable flag. A present value must be
/// a member of the configured options.
pub struct SelectValueProcessor;

impl ValueProcessor for SelectValueProcessor {
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult {
        if is_unset_or_blank(raw) {
            return ValidationResult::ok();
        }

        if coerce_scalar(raw).is_none() {
            return ValidationResult::fail(format!(
                "Property '{}' expects an option id",
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
        if is_unset_or_blank(raw) {
            return ValidationResult::ok();
        }

        let Some(value) = coerce_scalar(raw) else {
            return ValidationResult::ok();
        };

        if !definition.config.contains_option(&value) {
            return ValidationResult::fail(format!(
                "'{}' is not a valid option for property '{}'",
                value, definition.name
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
        let value = if is_unset_or_blank(raw) {
            None
        } else {
            coerce_scalar(raw)
        };
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
