//! Value processors - the create path
//!
//! One processor per property type. The pipeline is always
//! `validate_format -> validate_business_rules -> transform_to_db`, with the
//! caller short-circuiting on the first stage that reports `valid: false`.
//! Stage order is a contract: `transform_to_db` assumes its input already
//! passed both validation stages.

mod miners;
mod multi_select;
mod rich_text;
mod select;
mod text;
mod user;

pub use miners::MinersValueProcessor;
pub use multi_select::MultiSelectValueProcessor;
pub use rich_text::RichTextValueProcessor;
pub use select::SelectValueProcessor;
pub use text::TextValueProcessor;
pub use user::UserValueProcessor;

use lodestone_core::{DbInsertData, IssueId, PropertyDefinition, ValidationResult};
use serde_json::Value;

/// Per-type create pipeline.
///
/// Every method is a pure function of its arguments. Validation failures are
/// reported through `ValidationResult`, never by panicking.
pub trait ValueProcessor: Send + Sync {
    /// Check the coarse shape of the raw value and the nullable contract.
    fn validate_format(&self, definition: &PropertyDefinition, raw: &Value) -> ValidationResult;

    /// Check semantic constraints (lengths, option membership, cardinality).
    fn validate_business_rules(
        &self,
        definition: &PropertyDefinition,
        raw: &Value,
    ) -> ValidationResult;

    /// Turn a validated value into storage write instructions.
    fn transform_to_db(
        &self,
        definition: &PropertyDefinition,
        raw: &Value,
        issue_id: IssueId,
    ) -> DbInsertData;
}

// ============================================================================
// SHARED COERCION HELPERS
// ============================================================================

/// An absent value. JSON callers send `null` for unset properties.
pub(crate) fn is_unset(raw: &Value) -> bool {
    raw.is_null()
}

/// Absent or empty-string, the "unset" shape for select and user values.
pub(crate) fn is_unset_or_blank(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerce a scalar JSON value to its string form. Strings pass through,
/// numbers are rendered. Everything else is not string-coercible.
pub(crate) fn coerce_scalar(raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Coerce an array of scalars. Returns None if the value is not an array or
/// any element is not string-coercible.
pub(crate) fn coerce_scalar_array(raw: &Value) -> Option<Vec<String>> {
    let items = raw.as_array()?;
    items.iter().map(coerce_scalar).collect()
}

/// Numeric projection stored alongside the string value.
pub(crate) fn number_projection(value: &str) -> Option<f64> {
    value.parse().ok()
}

/// First duplicate in a list of values, if any.
pub(crate) fn find_duplicate(values: &[String]) -> Option<&str> {
    let mut seen = std::collections::HashSet::new();
    values
        .iter()
        .find(|v| !seen.insert(v.as_str()))
        .map(|v| v.as_str())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_scalar_string_and_number() {
        assert_eq!(coerce_scalar(&json!("abc")), Some("abc".to_string()));
        assert_eq!(coerce_scalar(&json!(42)), Some("42".to_string()));
        assert_eq!(coerce_scalar(&json!(1.5)), Some("1.5".to_string()));
        assert_eq!(coerce_scalar(&json!(null)), None);
        assert_eq!(coerce_scalar(&json!([1])), None);
        assert_eq!(coerce_scalar(&json!({"a": 1})), None);
    }

    #[test]
    fn test_coerce_scalar_array() {
        assert_eq!(
            coerce_scalar_array(&json!(["a", 2])),
            Some(vec!["a".to_string(), "2".to_string()])
        );
        assert_eq!(coerce_scalar_array(&json!("a")), None);
        assert_eq!(coerce_scalar_array(&json!([["nested"]])), None);
        assert_eq!(coerce_scalar_array(&json!([])), Some(Vec::new()));
    }

    #[test]
    fn test_unset_shapes() {
        assert!(is_unset(&json!(null)));
        assert!(!is_unset(&json!("")));
        assert!(is_unset_or_blank(&json!(null)));
        assert!(is_unset_or_blank(&json!("")));
        assert!(!is_unset_or_blank(&json!("x")));
        assert!(!is_unset_or_blank(&json!(0)));
    }

    #[test]
    fn test_find_duplicate() {
        let values = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(find_duplicate(&values), Some("a"));
        let unique = vec!["a".to_string(), "b".to_string()];
        assert_eq!(find_duplicate(&unique), None);
    }

    #[test]
    fn test_number_projection() {
        assert_eq!(number_projection("42"), Some(42.0));
        assert_eq!(number_projection("1.25"), Some(1.25));
        assert_eq!(number_projection("rig-7"), None);
    }
}
