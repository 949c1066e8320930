//! Identity types for LODESTONE entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Issue identifier using UUIDv7 for timestamp-sortable IDs.
/// UUIDv7 embeds a Unix timestamp, making IDs naturally sortable by creation time.
pub type IssueId = Uuid;

/// Property definition identifier.
pub type PropertyId = Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Generate a new UUIDv7 IssueId (timestamp-sortable).
pub fn new_issue_id() -> IssueId {
    Uuid::now_v7()
}

/// Generate a new UUIDv7 PropertyId (timestamp-sortable).
pub fn new_property_id() -> PropertyId {
    Uuid::now_v7()
}
