//! Error types for LODESTONE operations
//!
//! Two channels by design. Bad user data never becomes an error: the
//! processors report it through `ValidationResult`. The enums here signal
//! caller or configuration bugs (unknown type tag at processor lookup,
//! unsupported operator at filter compile) and are fatal for that call.

use thiserror::Error;

/// Processor lookup and dispatch errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Unsupported property type: {tag}")]
    UnsupportedType { tag: String },
}

/// Filter compilation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Unsupported filter operator {operator} for property type {property_type}")]
    UnsupportedOperator {
        operator: String,
        property_type: String,
    },

    #[error("Malformed filter condition: {reason}")]
    MalformedCondition { reason: String },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all LODESTONE errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LodestoneError {
    #[error("Processor error: {0}")]
    Processor(#[from] ProcessorError),

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for LODESTONE operations.
pub type LodestoneResult<T> = Result<T, LodestoneError>;

// ============================================================================
// TESTS
// ============================================================================
