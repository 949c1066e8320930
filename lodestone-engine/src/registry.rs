//! Processor registry
//!
//! Maps a property-type tag to its value and update processors. A pure
//! lookup table with no behavior of its own, built once from an
//! `EngineConfig` and never mutated afterwards.
//!
//! Lookup here fails loudly: an unknown tag on the create/update path is a
//! caller or configuration bug, not bad user data. The filter path has the
//! opposite policy (silent default fallback); that lookup lives in
//! `lodestone-query`.

use crate::update::{MultiValueUpdateProcessor, SingleValueUpdateProcessor, UpdateProcessor};
use crate::value::{
    MinersValueProcessor, MultiSelectValueProcessor, RichTextValueProcessor, SelectValueProcessor,
    TextValueProcessor, UserValueProcessor, ValueProcessor,
};
use lodestone_core::{EngineConfig, LodestoneResult, ProcessorError, PropertyType};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::str::FromStr;

/// Immutable dispatch tables for the create and update paths.
pub struct ProcessorRegistry {
    value: HashMap<PropertyType, Box<dyn ValueProcessor>>,
    update: HashMap<PropertyType, Box<dyn UpdateProcessor>>,
}

impl ProcessorRegistry {
    /// Build the registry. Validates the config before wiring processors.
    pub fn new(config: EngineConfig) -> LodestoneResult<Self> {
        config.validate()?;

        let mut value: HashMap<PropertyType, Box<dyn ValueProcessor>> = HashMap::new();
        value.insert(
            PropertyType::Text,
            Box::new(TextValueProcessor::new(config.max_text_length)),
        );
        value.insert(
            PropertyType::RichText,
            Box::new(RichTextValueProcessor::new(config.max_rich_text_length)),
        );
        value.insert(PropertyType::Select, Box::new(SelectValueProcessor));
        value.insert(
            PropertyType::MultiSelect,
            Box::new(MultiSelectValueProcessor::new(config.max_multi_values)),
        );
        value.insert(
            PropertyType::Miners,
            Box::new(MinersValueProcessor::new(config.max_multi_values)),
        );
        value.insert(PropertyType::User, Box::new(UserValueProcessor));

        let mut update: HashMap<PropertyType, Box<dyn UpdateProcessor>> = HashMap::new();
        for kind in [
            PropertyType::Text,
            PropertyType::RichText,
            PropertyType::Select,
            PropertyType::User,
        ] {
            update.insert(kind, Box::new(SingleValueUpdateProcessor::new(kind)));
        }
        for kind in [PropertyType::MultiSelect, PropertyType::Miners] {
            update.insert(
                kind,
                Box::new(MultiValueUpdateProcessor::new(
                    kind,
                    config.max_multi_values,
                )),
            );
        }

        Ok(Self { value, update })
    }

    fn parse_tag(tag: &str) -> LodestoneResult<PropertyType> {
        PropertyType::from_str(tag).map_err(|_| {
            ProcessorError::UnsupportedType {
                tag: tag.to_string(),
            }
            .into()
        })
    }

    /// Look up the create-path processor for a type tag.
    ///
    /// # Errors
    /// `ProcessorError::UnsupportedType` for an unregistered tag.
    pub fn value_processor(&self, tag: &str) -> LodestoneResult<&dyn ValueProcessor> {
        let kind = Self::parse_tag(tag)?;
        self.value
            .get(&kind)
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                ProcessorError::UnsupportedType {
                    tag: tag.to_string(),
                }
                .into()
            })
    }

    /// Look up the update-path processor for a type tag.
    ///
    /// # Errors
    /// `ProcessorError::UnsupportedType` for an unregistered tag.
    pub fn update_processor(&self, tag: &str) -> LodestoneResult<&dyn UpdateProcessor> {
        let kind = Self::parse_tag(tag)?;
        self.update
            .get(&kind)
            .map(|p| p.as_ref())
            .ok_or_else(|| {
                ProcessorError::UnsupportedType {
                    tag: tag.to_string(),
                }
                .into()
            })
    }
}

static DEFAULT_REGISTRY: Lazy<ProcessorRegistry> = Lazy::new(|| {
    ProcessorRegistry::new(EngineConfig::default()).expect("default engine config is valid")
});

/// The process-wide registry built from the default config.
pub fn registry() -> &'static ProcessorRegistry {
    &DEFAULT_REGISTRY
}

// ============================================================================
// TESTS
// ============================================================================
