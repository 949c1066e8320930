//! User-authored filter conditions
//!
//! A filter condition narrows an issue listing by one property. Conditions
//! arrive from the request layer as loosely-shaped user input, so every
//! field is optional here; the query builder validates and silently drops
//! malformed conditions instead of failing the whole listing.

use crate::PropertyId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Filter operator for property comparisons.
///
/// The full vocabulary deserializes so user input never fails at the
/// boundary; transformers decide per property type which operators compile
/// and reject the rest loudly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOperator {
    /// Equal to
    Eq,
    /// Not equal to
    Ne,
    /// Greater than
    Gt,
    /// Less than
    Lt,
    /// Greater than or equal
    Gte,
    /// Less than or equal
    Lte,
    /// Contains substring (for strings)
    Contains,
    /// In list of values
    In,
}

impl FilterOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOperator::Eq => "eq",
            FilterOperator::Ne => "ne",
            FilterOperator::Gt => "gt",
            FilterOperator::Lt => "lt",
            FilterOperator::Gte => "gte",
            FilterOperator::Lte => "lte",
            FilterOperator::Contains => "contains",
            FilterOperator::In => "in",
        }
    }
}

impl fmt::Display for FilterOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One user-authored filter condition on one property.
///
/// `property_type` stays a raw tag rather than a `PropertyType`: unknown
/// tags must reach the transformer lookup so they can degrade to the
/// default transformer instead of failing deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCondition {
    pub property_id: Option<PropertyId>,
    pub property_type: Option<String>,
    pub operator: Option<FilterOperator>,
    /// Operator-shaped value: scalar for `eq`, array for `in`
    #[serde(default)]
    pub value: serde_json::Value,
}

impl FilterCondition {
    /// Build a fully-specified condition.
    pub fn new(
        property_id: PropertyId,
        property_type: impl Into<String>,
        operator: FilterOperator,
        value: serde_json::Value,
    ) -> Self {
        Self {
            property_id: Some(property_id),
            property_type: Some(property_type.into()),
            operator: Some(operator),
            value,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
