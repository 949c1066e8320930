//! LODESTONE Core - Data Types
//!
//! Pure data structures with no behavior. All other crates depend on this.
//! This crate contains ONLY data types: identifiers, the property schema,
//! storage write instructions, filter conditions, errors, and engine
//! configuration. Validation and transformation logic lives in
//! `lodestone-engine` and `lodestone-query`.

pub mod config;
pub mod error;
pub mod filter;
pub mod identity;
pub mod property;
pub mod record;

pub use config::EngineConfig;
pub use error::{ConfigError, LodestoneError, LodestoneResult, ProcessorError, QueryError};
pub use filter::{FilterCondition, FilterOperator};
pub use identity::{new_issue_id, new_property_id, IssueId, PropertyId, Timestamp};
pub use property::{PropertyConfig, PropertyDefinition, PropertyType, SelectOption};
pub use record::{
    AppendRecord, DbInsertData, DbOperationResult, MultiValueRecord, SingleValueRecord,
    ValidationResult,
};
