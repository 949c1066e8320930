//! Property schema types
//!
//! A property is a typed, named attribute attachable to an issue. The schema
//! store owns `PropertyDefinition`s; the engine only reads them.

use crate::{PropertyId, Timestamp};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// PROPERTY TYPE
// ============================================================================

/// Type discriminator for issue properties.
///
/// Single-valued types store at most one row per issue. Multi-valued types
/// store an ordered collection of rows tracked by `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    /// Plain text, single-valued
    Text,
    /// Rich text (markdown), single-valued
    RichText,
    /// Single-select over configured options
    Select,
    /// Multi-select over configured options, ordered
    MultiSelect,
    /// Ordered list of miner inventory references
    Miners,
    /// Reference to a user, single-valued
    User,
}

impl PropertyType {
    /// All property types the engine knows about.
    pub const ALL: [PropertyType; 6] = [
        PropertyType::Text,
        PropertyType::RichText,
        PropertyType::Select,
        PropertyType::MultiSelect,
        PropertyType::Miners,
        PropertyType::User,
    ];

    /// The wire tag for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Text => "text",
            PropertyType::RichText => "rich_text",
            PropertyType::Select => "select",
            PropertyType::MultiSelect => "multi_select",
            PropertyType::Miners => "miners",
            PropertyType::User => "user",
        }
    }

    /// Whether this type stores an ordered collection of rows.
    pub fn is_multi_valued(&self) -> bool {
        matches!(self, PropertyType::MultiSelect | PropertyType::Miners)
    }

    /// Whether this type stores at most one row per issue.
    pub fn is_single_valued(&self) -> bool {
        !self.is_multi_valued()
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(PropertyType::Text),
            "rich_text" => Ok(PropertyType::RichText),
            "select" => Ok(PropertyType::Select),
            "multi_select" => Ok(PropertyType::MultiSelect),
            "miners" => Ok(PropertyType::Miners),
            "user" => Ok(PropertyType::User),
            _ => Err(format!("Invalid PropertyType: {}", s)),
        }
    }
}

// ============================================================================
// PROPERTY CONFIG
// ============================================================================

/// One selectable option of a select or multi-select property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Stable option identifier, referenced by stored values
    pub id: String,
    /// Human-readable label
    pub label: String,
    /// Display color hint, if any
    pub color: Option<String>,
}

impl SelectOption {
    /// Create an option whose label equals its id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            color: None,
        }
    }
}

/// Per-property configuration options.
///
/// All fields are optional; types ignore the fields that do not apply to
/// them (e.g. `options` is meaningless for text properties).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Valid options for select/multi-select properties
    #[serde(default)]
    pub options: Vec<SelectOption>,
    /// Upper bound on selection cardinality for multi-valued properties
    pub max_select: Option<usize>,
    /// Minimum string length for text properties
    pub min_length: Option<usize>,
    /// Maximum string length for text properties
    pub max_length: Option<usize>,
    /// Regex pattern a text value must match
    pub pattern: Option<String>,
}

impl PropertyConfig {
    /// Check option membership by id.
    pub fn contains_option(&self, id: &str) -> bool {
        self.options.iter().any(|o| o.id == id)
    }

    /// Iterator over the configured option ids.
    pub fn option_ids(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.id.as_str())
    }
}

// ============================================================================
// PROPERTY DEFINITION
// ============================================================================

/// Definition of one issue property.
///
/// Owned by the external schema store. Processors read definitions but never
/// mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDefinition {
    pub property_id: PropertyId,
    pub name: String,
    pub property_type: PropertyType,
    pub config: PropertyConfig,
    /// Whether a stored `null` value is permitted
    pub nullable: bool,
    /// Marks the designated title field; a title may not be blanked
    pub is_title: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PropertyDefinition {
    /// Create a definition with empty config, nullable, non-title.
    pub fn new(name: impl Into<String>, property_type: PropertyType) -> Self {
        let now = chrono::Utc::now();
        Self {
            property_id: crate::new_property_id(),
            name: name.into(),
            property_type,
            config: PropertyConfig::default(),
            nullable: true,
            is_title: false,
            created_at: now,
            updated_at: now,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
