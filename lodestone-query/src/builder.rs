//! Filter query builder
//!
//! Combines per-condition predicates into one conjunctive query. Each
//! condition runs through transformer lookup, `validate`, `preprocess`, and
//! `compile`. Malformed conditions are dropped with a logged warning so one
//! bad filter degrades the listing instead of failing it; an unsupported
//! operator still errors out of the whole build, because that is a caller
//! bug rather than bad user data.

use crate::predicate::FilterQuery;
use crate::transformers::transformer_for;
use lodestone_core::{FilterCondition, LodestoneResult};

/// Build one AND query from user-authored filter conditions.
///
/// Zero conditions, or zero conditions surviving validation, yield an
/// unconstrained query that matches every issue.
///
/// # Errors
/// `QueryError::UnsupportedOperator` if a condition that passed validation
/// carries an operator its property type cannot compile.
pub fn build_filter_query(conditions: &[FilterCondition]) -> LodestoneResult<FilterQuery> {
    let mut predicates = Vec::with_capacity(conditions.len());

    for condition in conditions {
        let transformer = transformer_for(condition.property_type.as_deref());

        if !transformer.validate(condition) {
            tracing::warn!(
                property_id = ?condition.property_id,
                property_type = ?condition.property_type,
                "skipping malformed filter condition"
            );
            continue;
        }

        let normalized = transformer.preprocess(condition.clone());
        predicates.push(transformer.compile(&normalized)?);
    }

    Ok(FilterQuery { predicates })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predicate::ValueMatcher;
    use lodestone_core::{new_property_id, FilterOperator, LodestoneError, QueryError};
    use serde_json::json;

    #[test]
    fn test_empty_input_is_unconstrained() {
        let query = build_filter_query(&[]).unwrap();
        assert!(query.is_unconstrained());
    }

    #[test]
    fn test_single_select_in_promotion() {
        let cond = FilterCondition::new(
            new_property_id(),
            "select",
            FilterOperator::In,
            json!("a"),
        );
        let query = build_filter_query(&[cond.clone()]).unwrap();
        assert_eq!(query.predicates.len(), 1);
        let predicate = &query.predicates[0];
        assert_eq!(predicate.property_id, cond.property_id.unwrap());
        assert_eq!(predicate.matcher, ValueMatcher::In(vec!["a".to_string()]));
    }

    #[test]
    fn test_malformed_condition_is_skipped() {
        let good = FilterCondition::new(
            new_property_id(),
            "select",
            FilterOperator::Eq,
            json!("open"),
        );
        let missing_id = FilterCondition {
            property_id: None,
            property_type: Some("select".to_string()),
            operator: Some(FilterOperator::Eq),
            value: json!("open"),
        };
        let query = build_filter_query(&[good, missing_id]).unwrap();
        assert_eq!(query.predicates.len(), 1);
    }

    #[test]
    fn test_all_malformed_yields_unconstrained() {
        let missing_operator = FilterCondition {
            property_id: Some(new_property_id()),
            property_type: Some("select".to_string()),
            operator: None,
            value: json!("open"),
        };
        let query = build_filter_query(&[missing_operator]).unwrap();
        assert!(query.is_unconstrained());
    }

    #[test]
    fn test_unsupported_operator_fails_the_build() {
        let cond = FilterCondition::new(
            new_property_id(),
            "select",
            FilterOperator::Gt,
            json!("a"),
        );
        let err = build_filter_query(&[cond]).unwrap_err();
        assert!(matches!(
            err,
            LodestoneError::Query(QueryError::UnsupportedOperator { .. })
        ));
    }

    #[test]
    fn test_unknown_type_compiles_with_default() {
        let cond = FilterCondition::new(
            new_property_id(),
            "holographic",
            FilterOperator::Eq,
            json!("x"),
        );
        let query = build_filter_query(&[cond]).unwrap();
        assert_eq!(query.predicates.len(), 1);
        assert_eq!(
            query.predicates[0].matcher,
            ValueMatcher::Eq("x".to_string())
        );
    }

    #[test]
    fn test_multiple_conditions_and_together() {
        let status_id = new_property_id();
        let assignee_id = new_property_id();
        let conditions = vec![
            FilterCondition::new(status_id, "select", FilterOperator::Eq, json!("open")),
            FilterCondition::new(
                assignee_id,
                "user",
                FilterOperator::In,
                json!(["user-1", "user-2"]),
            ),
        ];
        let query = build_filter_query(&conditions).unwrap();
        assert_eq!(query.predicates.len(), 2);

        assert!(query.matches(|id| {
            if *id == status_id {
                vec!["open".to_string()]
            } else {
                vec!["user-2".to_string()]
            }
        }));
        assert!(!query.matches(|id| {
            if *id == status_id {
                vec!["closed".to_string()]
            } else {
                vec!["user-2".to_string()]
            }
        }));
    }
}
