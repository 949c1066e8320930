//! Multi-select property value processor

use super::{coerce_scalar_array, find_duplicate, is_unset, number_projection, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, MultiValueRecord, PropertyDefinition, ValidationResult,
};
use serde_json::Value;

/// Create-path processor for multi-select properties.
///
/// Input is an ordered array of option ids. Absent input means "no
/// selection" and transforms to an empty record set. Business rules: every
/// member must be a configured option, members must be unique, and the
/// selection may not exceed the cardinality bound.
pub struct MultiSelectValueProcessor {
    /// Applied when the property config carries no max_select
    fallback_max_select: usize,
}

impl MultiSelectValueProcessor {
    pub fn new(fallback_max_select: usize) -> Self {
        Self {
            fallback_max_select,
        }
    }

    fn max_select(&self, definition: &PropertyDefinition) -> usize {
        definition
            .config
            .max_select
            .unwrap_or(self.fallback_max_select)
    }
}

impl ValueProcessor for MultiSelectValueProcessor {
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult {
        if is_unset(raw) {
            return ValidationResult::ok();
        }

        if coerce_scalar_array(raw).is_none() {
            return ValidationResult::fail(format!(
                "Property '{}' expects an array of option ids",
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

        for value in &values {
            if !definition.config.contains_option(value) {
                return ValidationResult::fail(format!(
                    "'{}' is not a valid option for property '{}'",
                    value, definition.name
                ));
            }
        }

        if let Some(dup) = find_duplicate(&values) {
            return ValidationResult::fail(format!(
                "Duplicate value '{}' for property '{}'",
                dup, definition.name
            ));
        }

        let max = self.max_select(definition);
        if values.len() > max {
            return ValidationResult::fail(format!(
                "Property '{}' exceeds the maximum of {} selections",
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

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_core::{new_issue_id, PropertyType, SelectOption};
    use serde_json::json;

    fn definition() -> PropertyDefinition {
        let mut def = PropertyDefinition::new("labels", PropertyType::MultiSelect);
        def.config.options = vec![
            SelectOption::new("a"),
            SelectOption::new("b"),
            SelectOption::new("c"),
        ];
        def
    }

    fn processor() -> MultiSelectValueProcessor {
        MultiSelectValueProcessor::new(256)
    }

    #[test]
    fn test_format_requires_array() {
        let def = definition();
        let p = processor();
        assert!(p.validate_format(&def, &json!(["a"])).is_valid());
        assert!(p.validate_format(&def, &json!(null)).is_valid());
        assert!(!p.validate_format(&def, &json!("a")).is_valid());
        assert!(!p.validate_format(&def, &json!([["a"]])).is_valid());
    }

    #[test]
    fn test_membership_failure() {
        let def = definition();
        let p = processor();
        let result = p.validate_business_rules(&def, &json!(["a", "zzz"]));
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("zzz"));
    }

    #[test]
    fn test_duplicate_failure() {
        let def = definition();
        let p = processor();
        let result = p.validate_business_rules(&def, &json!(["a", "a"]));
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("Duplicate"));
    }

    #[test]
    fn test_max_select_bound() {
        let mut def = definition();
        def.config.max_select = Some(1);
        let p = processor();
        assert!(p.validate_business_rules(&def, &json!(["a"])).is_valid());
        let result = p.validate_business_rules(&def, &json!(["a", "b"]));
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("maximum"));
    }

    #[test]
    fn test_transform_positions_follow_input_order() {
        let def = definition();
        let p = processor();
        let data = p.transform_to_db(&def, &json!(["c", "a", "b"]), new_issue_id());
        let positions: Vec<i32> = data.multi_values.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        let values: Vec<&str> = data
            .multi_values
            .iter()
            .map(|r| r.value.as_deref().unwrap())
            .collect();
        assert_eq!(values, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_transform_unset_yields_empty_set() {
        let def = definition();
        let p = processor();
        let data = p.transform_to_db(&def, &json!(null), new_issue_id());
        assert!(data.multi_values.is_empty());
        assert!(data.single_values.is_empty());
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
