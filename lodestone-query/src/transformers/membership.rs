//! Membership filter transformer
//!
//! Shared by the option-backed types (select, multi_select, miners) and
//! user references: filtering on any of them is a set-membership question
//! over stored id strings. Option membership itself is not re-checked at
//! query time; a filter on an id that no longer exists simply matches
//! nothing.

use super::{is_in_shaped, scalar_string, FilterTransformer};
use crate::predicate::{PropertyPredicate, ValueMatcher};
use lodestone_core::{FilterCondition, FilterOperator, LodestoneResult, QueryError};
use serde_json::Value;

pub struct MembershipFilterTransformer;

impl FilterTransformer for MembershipFilterTransformer {
    fn validate(&self, condition: &FilterCondition) -> bool {
        if condition.property_id.is_none() || condition.property_type.is_none() {
            return false;
        }
        let Some(operator) = condition.operator else {
            return false;
        };

        match operator {
            FilterOperator::Eq => scalar_string(&condition.value).is_some(),
            FilterOperator::In => is_in_shaped(&condition.value),
            // Shape unknown for other operators; let compile reject them
            // loudly instead of silently dropping a caller bug.
            _ => !condition.value.is_null(),
        }
    }

    fn preprocess(&self, mut condition: FilterCondition) -> FilterCondition {
        // A single-element `in` arrives as a scalar; promote it to a
        // one-element array and string-coerce the members.
        if condition.operator == Some(FilterOperator::In) {
            let members: Vec<Value> = match &condition.value {
                Value::Array(items) => items
                    .iter()
                    .filter_map(scalar_string)
                    .map(Value::String)
                    .collect(),
                scalar => scalar_string(scalar)
                    .map(Value::String)
                    .into_iter()
                    .collect(),
            };
            condition.value = Value::Array(members);
        }
        condition
    }

    fn compile(&self, condition: &FilterCondition) -> LodestoneResult<PropertyPredicate> {
        let property_id = condition.property_id.ok_or_else(|| {
            QueryError::MalformedCondition {
                reason: "missing property_id".to_string(),
            }
        })?;
        let operator = condition.operator.ok_or_else(|| {
            QueryError::MalformedCondition {
                reason: "missing operator".to_string(),
            }
        })?;
        let property_type = condition
            .property_type
            .clone()
            .unwrap_or_else(|| "unknown".to_string());

        let matcher = match operator {
            FilterOperator::Eq => {
                let value = scalar_string(&condition.value).ok_or_else(|| {
                    QueryError::MalformedCondition {
                        reason: "eq requires a scalar value".to_string(),
                    }
                })?;
                ValueMatcher::Eq(value)
            }
            FilterOperator::In => {
                let members = condition
                    .value
                    .as_array()
                    .map(|items| items.iter().filter_map(scalar_string).collect())
                    .ok_or_else(|| QueryError::MalformedCondition {
                        reason: "in requires an array value".to_string(),
                    })?;
                ValueMatcher::In(members)
            }
            other => {
                return Err(QueryError::UnsupportedOperator {
                    operator: other.to_string(),
                    property_type,
                }
                .into())
            }
        };

        Ok(PropertyPredicate {
            property_id,
            property_type: condition.property_type.clone(),
            matcher,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use lodestone_core::{new_property_id, LodestoneError};
    use serde_json::json;

    fn condition(operator: FilterOperator, value: serde_json::Value) -> FilterCondition {
        FilterCondition::new(new_property_id(), "select", operator, value)
    }

    #[test]
    fn test_validate_presence() {
        let t = MembershipFilterTransformer;
        let mut cond = condition(FilterOperator::Eq, json!("a"));
        assert!(t.validate(&cond));

        cond.property_id = None;
        assert!(!t.validate(&cond));
    }

    #[test]
    fn test_validate_value_shapes() {
        let t = MembershipFilterTransformer;
        assert!(t.validate(&condition(FilterOperator::Eq, json!("a"))));
        assert!(t.validate(&condition(FilterOperator::Eq, json!(3))));
        assert!(!t.validate(&condition(FilterOperator::Eq, json!(["a"]))));
        assert!(t.validate(&condition(FilterOperator::In, json!(["a", "b"]))));
        // Scalar `in` is valid; preprocess promotes it
        assert!(t.validate(&condition(FilterOperator::In, json!("a"))));
        assert!(!t.validate(&condition(FilterOperator::In, json!(null))));
    }

    #[test]
    fn test_preprocess_promotes_scalar_in() {
        let t = MembershipFilterTransformer;
        let cond = t.preprocess(condition(FilterOperator::In, json!("a")));
        assert_eq!(cond.value, json!(["a"]));
    }

    #[test]
    fn test_preprocess_string_coerces_members() {
        let t = MembershipFilterTransformer;
        let cond = t.preprocess(condition(FilterOperator::In, json!([1, "b"])));
        assert_eq!(cond.value, json!(["1", "b"]));
    }

    #[test]
    fn test_compile_eq() {
        let t = MembershipFilterTransformer;
        let cond = condition(FilterOperator::Eq, json!("open"));
        let predicate = t.compile(&cond).unwrap();
        assert_eq!(predicate.property_id, cond.property_id.unwrap());
        assert_eq!(predicate.matcher, ValueMatcher::Eq("open".to_string()));
    }

    #[test]
    fn test_compile_in_after_preprocess() {
        let t = MembershipFilterTransformer;
        let cond = t.preprocess(condition(FilterOperator::In, json!("a")));
        let predicate = t.compile(&cond).unwrap();
        assert_eq!(predicate.matcher, ValueMatcher::In(vec!["a".to_string()]));
        assert!(predicate.matches_values(&["a".to_string()]));
    }

    #[test]
    fn test_compile_rejects_unsupported_operator() {
        let t = MembershipFilterTransformer;
        let cond = condition(FilterOperator::Gt, json!("a"));
        let err = t.compile(&cond).unwrap_err();
        assert!(matches!(
            err,
            LodestoneError::Query(QueryError::UnsupportedOperator { ref operator, .. })
                if operator == "gt"
        ));
    }

    #[test]
    fn test_compile_number_eq_coerces() {
        let t = MembershipFilterTransformer;
        let cond = condition(FilterOperator::Eq, json!(7));
        let predicate = t.compile(&cond).unwrap();
        assert_eq!(predicate.matcher, ValueMatcher::Eq("7".to_string()));
    }
}
