//! Filter transformers
//!
//! One transformer per filterable property type, compiling a user-authored
//! `FilterCondition` into a `PropertyPredicate`. The lookup here never
//! fails: unknown type tags receive the default transformer and a logged
//! warning. This is the opposite policy from the create/update registry,
//! which fails loudly on unknown tags; the filter path degrades gracefully
//! under partially-unknown schemas so one odd condition cannot take down a
//! whole listing request.

mod default;
mod membership;

pub use default::DefaultFilterTransformer;
pub use membership::MembershipFilterTransformer;

use crate::predicate::PropertyPredicate;
use lodestone_core::{FilterCondition, LodestoneResult};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Per-type filter compilation pipeline.
///
/// `validate` is a cheap pre-check the builder uses to silently skip
/// malformed conditions; it never errors. `preprocess` normalizes the value
/// shape. `compile` produces the predicate and is the loud stage: an
/// operator the type does not support is a caller bug and errors out.
pub trait FilterTransformer: Send + Sync {
    /// Whether the condition is well-formed enough to compile.
    fn validate(&self, condition: &FilterCondition) -> bool;

    /// Normalize the condition's value shape.
    fn preprocess(&self, condition: FilterCondition) -> FilterCondition;

    /// Compile the condition into a predicate.
    ///
    /// # Errors
    /// `QueryError::UnsupportedOperator` if the operator does not apply to
    /// this property type; `QueryError::MalformedCondition` if called on a
    /// condition that `validate` would have rejected.
    fn compile(&self, condition: &FilterCondition) -> LodestoneResult<PropertyPredicate>;
}

static MEMBERSHIP: MembershipFilterTransformer = MembershipFilterTransformer;
static DEFAULT: DefaultFilterTransformer = DefaultFilterTransformer;

/// Known tag to transformer table, built once.
static TRANSFORMERS: Lazy<HashMap<&'static str, &'static (dyn FilterTransformer)>> =
    Lazy::new(|| {
        let mut table: HashMap<&'static str, &'static dyn FilterTransformer> = HashMap::new();
        table.insert("select", &MEMBERSHIP);
        table.insert("multi_select", &MEMBERSHIP);
        table.insert("miners", &MEMBERSHIP);
        table.insert("user", &MEMBERSHIP);
        table.insert("text", &DEFAULT);
        table.insert("rich_text", &DEFAULT);
        table
    });

/// Look up the transformer for a property-type tag. Total: unknown tags get
/// the default transformer with a logged warning, missing tags just get the
/// default (the builder's validate step will drop the condition anyway).
pub fn transformer_for(tag: Option<&str>) -> &'static dyn FilterTransformer {
    match tag {
        Some(tag) => TRANSFORMERS.get(tag).copied().unwrap_or_else(|| {
            tracing::warn!(property_type = tag, "no filter transformer for property type, using default");
            &DEFAULT
        }),
        None => &DEFAULT,
    }
}

// ============================================================================
// SHARED HELPERS
// ============================================================================

/// String form of a scalar condition value (string or number).
pub(crate) fn scalar_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Whether the value is a scalar or an array of scalars, the shapes an `in`
/// condition accepts before preprocessing.
pub(crate) fn is_in_shaped(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Array(items) => items.iter().all(|v| scalar_string(v).is_some()),
        other => scalar_string(other).is_some(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
