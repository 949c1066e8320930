//! LODESTONE Test Utilities
//!
//! Centralized test infrastructure for the LODESTONE workspace:
//! - Definition fixtures for every property type
//! - Canned filter conditions
//! - Proptest generators for schema and value shapes

// Re-export core types for convenience
pub use lodestone_core::{
    new_issue_id, new_property_id, DbInsertData, DbOperationResult, EngineConfig, FilterCondition,
    FilterOperator, IssueId, LodestoneError, LodestoneResult, MultiValueRecord, PropertyConfig,
    PropertyDefinition, PropertyId, PropertyType, SelectOption, SingleValueRecord,
    ValidationResult,
};

use proptest::prelude::*;

// ============================================================================
// DEFINITION FIXTURES
// ============================================================================

/// A nullable text property named "summary".
pub fn text_definition() -> PropertyDefinition {
    PropertyDefinition::new("summary", PropertyType::Text)
}

/// The designated title property: text, non-nullable, is_title.
pub fn title_definition() -> PropertyDefinition {
    let mut def = PropertyDefinition::new("title", PropertyType::Text);
    def.nullable = false;
    def.is_title = true;
    def
}

/// A rich text property named "description".
pub fn rich_text_definition() -> PropertyDefinition {
    PropertyDefinition::new("description", PropertyType::RichText)
}

/// A select property with the given option ids.
pub fn select_definition(option_ids: &[&str]) -> PropertyDefinition {
    let mut def = PropertyDefinition::new("status", PropertyType::Select);
    def.config.options = option_ids.iter().map(|id| SelectOption::new(*id)).collect();
    def
}

/// A multi-select property with the given option ids.
pub fn multi_select_definition(option_ids: &[&str]) -> PropertyDefinition {
    let mut def = PropertyDefinition::new("labels", PropertyType::MultiSelect);
    def.config.options = option_ids.iter().map(|id| SelectOption::new(*id)).collect();
    def
}

/// A miners list property with an optional cardinality bound.
pub fn miners_definition(max_select: Option<usize>) -> PropertyDefinition {
    let mut def = PropertyDefinition::new("affected_miners", PropertyType::Miners);
    def.config.max_select = max_select;
    def
}

/// A user reference property named "assignee".
pub fn user_definition() -> PropertyDefinition {
    PropertyDefinition::new("assignee", PropertyType::User)
}

// ============================================================================
// FILTER FIXTURES
// ============================================================================

/// A well-formed select `eq` condition.
pub fn select_eq_condition(property_id: PropertyId, option_id: &str) -> FilterCondition {
    FilterCondition::new(
        property_id,
        "select",
        FilterOperator::Eq,
        serde_json::Value::String(option_id.to_string()),
    )
}

/// A condition missing its property id, which builders must drop.
pub fn condition_missing_id() -> FilterCondition {
    FilterCondition {
        property_id: None,
        property_type: Some("select".to_string()),
        operator: Some(FilterOperator::Eq),
        value: serde_json::Value::String("open".to_string()),
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

/// Any property type.
pub fn arb_property_type() -> impl Strategy<Value = PropertyType> {
    prop::sample::select(PropertyType::ALL.to_vec())
}

/// Option-id strings in the shape fixtures use.
pub fn arb_option_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// A set of distinct option ids.
pub fn arb_option_ids(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set(arb_option_id(), 1..=max)
        .prop_map(|set| set.into_iter().collect())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_fixture_shape() {
        let def = title_definition();
        assert!(def.is_title);
        assert!(!def.nullable);
        assert_eq!(def.property_type, PropertyType::Text);
    }

    #[test]
    fn test_select_fixture_options() {
        let def = select_definition(&["open", "done"]);
        assert!(def.config.contains_option("open"));
        assert!(def.config.contains_option("done"));
        assert!(!def.config.contains_option("other"));
    }

    #[test]
    fn test_condition_missing_id_is_incomplete() {
        assert!(condition_missing_id().property_id.is_none());
    }
}
