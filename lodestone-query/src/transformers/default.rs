//! Default filter transformer
//!
//! Naive string-equality matching. Serves the plain text types and any
//! property type the table does not know. Keeping unknown types filterable
//! (rather than erroring) lets a listing request survive a schema the
//! engine only partially understands.

use super::{scalar_string, FilterTransformer};
use crate::predicate::{PropertyPredicate, ValueMatcher};
use lodestone_core::{FilterCondition, FilterOperator, LodestoneResult, QueryError};

pub struct DefaultFilterTransformer;

impl FilterTransformer for DefaultFilterTransformer {
    fn validate(&self, condition: &FilterCondition) -> bool {
        condition.property_id.is_some()
            && condition.property_type.is_some()
            && condition.operator == Some(FilterOperator::Eq)
            && scalar_string(&condition.value).is_some()
    }

    fn preprocess(&self, condition: FilterCondition) -> FilterCondition {
        condition
    }

    fn compile(&self, condition: &FilterCondition) -> LodestoneResult<PropertyPredicate> {
        let property_id = condition.property_id.ok_or_else(|| {
            QueryError::MalformedCondition {
                reason: "missing property_id".to_string(),
            }
        })?;

        match condition.operator {
            Some(FilterOperator::Eq) => {
                let value = scalar_string(&condition.value).ok_or_else(|| {
                    QueryError::MalformedCondition {
                        reason: "eq requires a scalar value".to_string(),
                    }
                })?;
                Ok(PropertyPredicate {
                    property_id,
                    property_type: condition.property_type.clone(),
                    matcher: ValueMatcher::Eq(value),
                })
            }
            Some(other) => Err(QueryError::UnsupportedOperator {
                operator: other.to_string(),
                property_type: condition
                    .property_type
                    .clone()
                    .unwrap_or_else(|| "unknown".to_string()),
            }
            .into()),
            None => Err(QueryError::MalformedCondition {
                reason: "missing operator".to_string(),
            }
            .into()),
        }
    }
}
