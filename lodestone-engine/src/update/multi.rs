//! Update processor for multi-valued properties

use super::{UpdateOperation, UpdateProcessor};
use crate::value::{find_duplicate, number_projection};
use lodestone_core::{
    AppendRecord, DbOperationResult, IssueId, MultiValueRecord, PropertyDefinition, PropertyType,
    ValidationResult,
};

/// Mutation processor shared by the multi-valued property types
/// (multi_select, miners).
///
/// Legal operations: ADD appends one element, UPDATE atomically replaces the
/// whole ordered set, REMOVE deletes every row. Option membership applies to
/// multi_select only; miner ids are validated by the external inventory.
pub struct MultiValueUpdateProcessor {
    kind: PropertyType,
    /// Applied when the property config carries no max_select
    fallback_max_select: usize,
}

impl MultiValueUpdateProcessor {
    pub fn new(kind: PropertyType, fallback_max_select: usize) -> Self {
        debug_assert!(kind.is_multi_valued());
        Self {
            kind,
            fallback_max_select,
        }
    }

    fn checks_membership(&self) -> bool {
        self.kind == PropertyType::MultiSelect
    }

    fn max_select(&self, definition: &PropertyDefinition) -> usize {
        definition
            .config
            .max_select
            .unwrap_or(self.fallback_max_select)
    }

    fn membership_failure(
        &self,
        definition: &PropertyDefinition,
        value: &str,
    ) -> Option<ValidationResult> {
        if self.checks_membership() && !definition.config.contains_option(value) {
            return Some(ValidationResult::fail(format!(
                "'{}' is not a valid option for property '{}'",
                value, definition.name
            )));
        }
        None
    }

    fn record_at(
        &self,
        definition: &PropertyDefinition,
        issue_id: IssueId,
        value: &str,
        position: i32,
    ) -> MultiValueRecord {
        MultiValueRecord {
            issue_id,
            property_id: definition.property_id,
            property_type: definition.property_type,
            value: Some(value.to_string()),
            number_value: number_projection(value),
            position,
        }
    }
}

impl UpdateProcessor for MultiValueUpdateProcessor {
    fn validate_format(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
    ) -> ValidationResult {
        match operation {
            UpdateOperation::Add { value } => {
                if value.is_empty() {
                    return ValidationResult::fail(format!(
                        "Property '{}' cannot add an empty value",
                        definition.name
                    ));
                }
                ValidationResult::ok()
            }
            UpdateOperation::Update { .. } | UpdateOperation::Remove => ValidationResult::ok(),
            other => ValidationResult::fail(format!(
                "Operation '{}' is not supported for multi-valued property '{}'",
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
        match operation {
            UpdateOperation::Add { value } => {
                if let Some(failure) = self.membership_failure(definition, value) {
                    return failure;
                }
                ValidationResult::ok()
            }
            UpdateOperation::Update { values } => {
                for value in values {
                    if let Some(failure) = self.membership_failure(definition, value) {
                        return failure;
                    }
                }

                if let Some(dup) = find_duplicate(values) {
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
            _ => ValidationResult::ok(),
        }
    }

    fn transform_to_db_operations(
        &self,
        definition: &PropertyDefinition,
        operation: &UpdateOperation,
        issue_id: IssueId,
        current_count: usize,
    ) -> DbOperationResult {
        match operation {
            UpdateOperation::Add { value } => DbOperationResult {
                // No position here: the executor assigns max + 1 atomically
                // with the insert.
                multi_value_append: Some(AppendRecord {
                    issue_id,
                    property_id: definition.property_id,
                    property_type: definition.property_type,
                    value: Some(value.clone()),
                    number_value: number_projection(value),
                }),
                ..Default::default()
            },
            UpdateOperation::Update { values } => DbOperationResult {
                multi_value_remove_positions: (0..current_count as i32).collect(),
                multi_value_creates: values
                    .iter()
                    .enumerate()
                    .map(|(i, v)| self.record_at(definition, issue_id, v, i as i32))
                    .collect(),
                ..Default::default()
            },
            UpdateOperation::Remove => DbOperationResult {
                multi_value_remove_positions: (0..current_count as i32).collect(),
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

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_core::{new_issue_id, SelectOption};

    fn multi_select_def() -> PropertyDefinition {
        let mut def = PropertyDefinition::new("labels", PropertyType::MultiSelect);
        def.config.options = vec![
            SelectOption::new("a"),
            SelectOption::new("b"),
            SelectOption::new("c"),
        ];
        def
    }

    fn miners_def() -> PropertyDefinition {
        PropertyDefinition::new("affected_miners", PropertyType::Miners)
    }

    fn multi_select() -> MultiValueUpdateProcessor {
        MultiValueUpdateProcessor::new(PropertyType::MultiSelect, 256)
    }

    fn miners() -> MultiValueUpdateProcessor {
        MultiValueUpdateProcessor::new(PropertyType::Miners, 256)
    }

    fn update(values: &[&str]) -> UpdateOperation {
        UpdateOperation::Update {
            values: values.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_set_is_a_format_failure() {
        let def = multi_select_def();
        let p = multi_select();
        let set = UpdateOperation::Set {
            value: Some("a".to_string()),
        };
        let result = p.validate_format(&def, &set);
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("not supported"));
    }

    #[test]
    fn test_add_empty_value_rejected() {
        let def = miners_def();
        let p = miners();
        let add = UpdateOperation::Add {
            value: String::new(),
        };
        assert!(!p.validate_format(&def, &add).is_valid());
    }

    #[test]
    fn test_add_membership_multi_select_only() {
        let add = UpdateOperation::Add {
            value: "zzz".to_string(),
        };
        assert!(!multi_select()
            .validate_business_rules(&multi_select_def(), &add)
            .is_valid());
        // miners accepts any well-formed id
        assert!(miners()
            .validate_business_rules(&miners_def(), &add)
            .is_valid());
    }

    #[test]
    fn test_add_transform_emits_append_without_position() {
        let def = miners_def();
        let p = miners();
        let add = UpdateOperation::Add {
            value: "rig-7".to_string(),
        };
        let result = p.transform_to_db_operations(&def, &add, new_issue_id(), 3);
        let append = result.multi_value_append.unwrap();
        assert_eq!(append.value.as_deref(), Some("rig-7"));
        assert!(result.multi_value_creates.is_empty());
        assert!(result.multi_value_remove_positions.is_empty());
    }

    #[test]
    fn test_update_duplicate_rejected() {
        let def = multi_select_def();
        let p = multi_select();
        let result = p.validate_business_rules(&def, &update(&["a", "a"]));
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("Duplicate"));
    }

    #[test]
    fn test_update_max_select_rejected() {
        let mut def = multi_select_def();
        def.config.max_select = Some(1);
        let p = multi_select();
        let result = p.validate_business_rules(&def, &update(&["a", "b"]));
        assert!(!result.is_valid());
        assert!(result.errors[0].contains("maximum"));
    }

    #[test]
    fn test_update_transform_full_replace() {
        let def = multi_select_def();
        let p = multi_select();
        let issue_id = new_issue_id();
        let result = p.transform_to_db_operations(&def, &update(&["c", "a", "b"]), issue_id, 2);

        // Every pre-existing position is removed
        assert_eq!(result.multi_value_remove_positions, vec![0, 1]);

        // Creates are renumbered 0..n-1 in input order
        let positions: Vec<i32> = result.multi_value_creates.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![0, 1, 2]);
        let values: Vec<&str> = result
            .multi_value_creates
            .iter()
            .map(|r| r.value.as_deref().unwrap())
            .collect();
        assert_eq!(values, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_remove_transform_covers_all_positions() {
        let def = miners_def();
        let p = miners();
        let result =
            p.transform_to_db_operations(&def, &UpdateOperation::Remove, new_issue_id(), 4);
        assert_eq!(result.multi_value_remove_positions, vec![0, 1, 2, 3]);
        assert!(result.multi_value_creates.is_empty());
    }

    #[test]
    fn test_remove_on_empty_property_is_noop() {
        let def = miners_def();
        let p = miners();
        let result =
            p.transform_to_db_operations(&def, &UpdateOperation::Remove, new_issue_id(), 0);
        assert!(result.multi_value_remove_positions.is_empty());
        assert!(result.is_noop());
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use lodestone_core::{new_issue_id, SelectOption};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// After any UPDATE, creates carry dense positions 0..n-1 in input
        /// order and removals cover exactly the pre-existing positions.
        #[test]
        fn prop_update_maintains_position_invariant(
            count in 0usize..16,
            current in 0usize..16,
        ) {
            let values: Vec<String> = (0..count).map(|i| format!("opt{}", i)).collect();
            let mut def = PropertyDefinition::new("labels", PropertyType::MultiSelect);
            def.config.options = (0..16).map(|i| SelectOption::new(format!("opt{}", i))).collect();

            let p = MultiValueUpdateProcessor::new(PropertyType::MultiSelect, 256);
            let op = UpdateOperation::Update { values: values.clone() };
            prop_assert!(p.validate_business_rules(&def, &op).is_valid());

            let result = p.transform_to_db_operations(&def, &op, new_issue_id(), current);

            let expected_removes: Vec<i32> = (0..current as i32).collect();
            prop_assert_eq!(&result.multi_value_remove_positions, &expected_removes);

            for (i, record) in result.multi_value_creates.iter().enumerate() {
                prop_assert_eq!(record.position, i as i32);
                prop_assert_eq!(record.value.as_deref(), Some(values[i].as_str()));
            }
        }
    }
}
