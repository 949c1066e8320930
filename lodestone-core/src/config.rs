//! Engine configuration
//!
//! Workspace-wide fallback bounds, applied when a `PropertyConfig` does not
//! carry its own. Validated once at registry construction.

use crate::{ConfigError, LodestoneError, LodestoneResult};
use serde::{Deserialize, Serialize};

/// Fallback limits for the processor pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on text values when the property config has no max_length
    pub max_text_length: usize,
    /// Upper bound on rich text values
    pub max_rich_text_length: usize,
    /// Upper bound on multi-value cardinality when the property config has
    /// no max_select
    pub max_multi_values: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_text_length: 1_024,
            max_rich_text_length: 65_536,
            max_multi_values: 256,
        }
    }
}

impl EngineConfig {
    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(LodestoneError::Config) if invalid.
    pub fn validate(&self) -> LodestoneResult<()> {
        if self.max_text_length == 0 {
            return Err(LodestoneError::Config(ConfigError::InvalidValue {
                field: "max_text_length".to_string(),
                value: self.max_text_length.to_string(),
                reason: "must be greater than 0".to_string(),
            }));
        }

        if self.max_rich_text_length == 0 {
            return Err(LodestoneError::Config(ConfigError::InvalidValue {
                field: "max_rich_text_length".to_string(),
                value: self.max_rich_text_length.to_string(),
                reason: "must be greater than 0".to_string(),
            }));
        }

        if self.max_multi_values == 0 {
            return Err(LodestoneError::Config(ConfigError::InvalidValue {
                field: "max_multi_values".to_string(),
                value: self.max_multi_values.to_string(),
                reason: "must be greater than 0".to_string(),
            }));
        }

        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
