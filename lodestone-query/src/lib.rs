//! LODESTONE Query - Filter Compilation
//!
//! Turns user-authored filter conditions into composable query predicates.
//! Per-type transformers validate and normalize each condition; the builder
//! ANDs the surviving predicates into one `FilterQuery`.
//!
//! Failure policy differs from the create/update engine on purpose: a
//! malformed condition is dropped with a warning and an unknown property
//! type falls back to a default transformer, so listing requests degrade
//! gracefully. Only an unsupported operator (a caller bug) is loud.

pub mod builder;
pub mod predicate;
pub mod transformers;

pub use builder::build_filter_query;
pub use predicate::{FilterQuery, PropertyPredicate, ValueMatcher};
pub use transformers::{
    transformer_for, DefaultFilterTransformer, FilterTransformer, MembershipFilterTransformer,
};
