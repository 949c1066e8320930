//! Compiled query predicates
//!
//! A filter condition compiles into a `PropertyPredicate` scoped to one
//! property. Predicates from multiple conditions combine under logical AND
//! into a `FilterQuery`. There is no OR, NOT, or nested grouping; that is a
//! deliberate scope limit of the filtering model.

use lodestone_core::PropertyId;
use serde::{Deserialize, Serialize};

/// Value comparison of one predicate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueMatcher {
    /// Stored value equals x
    Eq(String),
    /// Stored value is a member of the set
    In(Vec<String>),
}

impl ValueMatcher {
    /// Whether one stored value satisfies this matcher.
    pub fn matches(&self, value: &str) -> bool {
        match self {
            ValueMatcher::Eq(expected) => value == expected,
            ValueMatcher::In(set) => set.iter().any(|v| v == value),
        }
    }
}

/// One compiled predicate, scoped to a property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyPredicate {
    pub property_id: PropertyId,
    /// Type tag carried through for executors that partition storage by type
    pub property_type: Option<String>,
    pub matcher: ValueMatcher,
}

impl PropertyPredicate {
    /// Whether any of a property's stored values satisfies the matcher.
    ///
    /// Multi-valued properties store several rows; a predicate holds if at
    /// least one of them matches.
    pub fn matches_values(&self, values: &[String]) -> bool {
        values.iter().any(|v| self.matcher.matches(v))
    }
}

/// A conjunctive query over property predicates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterQuery {
    pub predicates: Vec<PropertyPredicate>,
}

impl FilterQuery {
    /// A query with no predicates matches every issue.
    pub fn is_unconstrained(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate the query against one issue's stored values.
    ///
    /// `lookup` returns the stored values for a property of the issue under
    /// test (empty if the property is unset). All predicates must hold.
    pub fn matches<F>(&self, lookup: F) -> bool
    where
        F: Fn(&PropertyId) -> Vec<String>,
    {
        self.predicates
            .iter()
            .all(|p| p.matches_values(&lookup(&p.property_id)))
    }
}

// ============================================================================
// TESTS
// ============================================================================
