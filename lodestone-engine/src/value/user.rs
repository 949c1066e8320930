//! User reference property value processor

use super::{is_unset_or_blank, ValueProcessor};
use lodestone_core::{
    DbInsertData, IssueId, PropertyDefinition, SingleValueRecord, ValidationResult,
};
use serde_json::Value;

/// Create-path processor for user reference properties.
///
/// The value is a user id string; empty or null means unassigned and is
/// always accepted.
pub struct UserValueProcessor;

impl ValueProcessor for UserValueProcessor {
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult {
        if is_unset_or_blank(raw) {
            return ValidationResult::ok();
        }

        if !raw.is_string() {
            return ValidationResult::fail(format!(
                "Property '{}' expects a user id",
                definition.name
            ));
        }

        ValidationResult::ok()
    }

    fn validate_business_rules(
        &self,
        _definition: &PropertyDefinition,
        _raw: &Value,
    ) -> ValidationResult {
        // TODO: check that the referenced user exists once the directory
        // service exposes a lookup to this layer.
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
            raw.as_str().map(str::to_string)
        };
        DbInsertData::single(SingleValueRecord {
            issue_id,
            property_id: definition.property_id,
            property_type: definition.property_type,
            value,
            number_value: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_core::{new_issue_id, PropertyType};
    use serde_json::json;

    fn definition() -> PropertyDefinition {
        PropertyDefinition::new("assignee", PropertyType::User)
    }

    #[test]
    fn test_string_only() {
        let def = definition();
        let p = UserValueProcessor;
        assert!(p.validate_format(&def, &json!("user-42")).is_valid());
        assert!(!p.validate_format(&def, &json!(42)).is_valid());
        assert!(!p.validate_format(&def, &json!(["user-42"])).is_valid());
    }

    #[test]
    fn test_unassigned_accepted() {
        let def = definition();
        let p = UserValueProcessor;
        assert!(p.validate_format(&def, &json!(null)).is_valid());
        assert!(p.validate_format(&def, &json!("")).is_valid());
    }

    #[test]
    fn test_transform() {
        let def = definition();
        let p = UserValueProcessor;
        let data = p.transform_to_db(&def, &json!("user-42"), new_issue_id());
        assert_eq!(data.single_values[0].value.as_deref(), Some("user-42"));

        let unset = p.transform_to_db(&def, &json!(""), new_issue_id());
        assert_eq!(unset.single_values[0].value, None);
    }
}
