//! # Staging Primitives
//!
//! Hardcoded runtime constants for the stagetrace CORE.
//!
//! These values describe the shape of the change history the collector
//! understands. They are compiled into the binary and are immutable at runtime.

/// Alias marker that seeds the first stage with the issue's creation date.
///
/// Only recognised among the aliases of the FIRST stage.
pub const CREATED_MARKER: &str = "(Created)";

/// Alias marker that seeds the closing stage with the issue's resolution date.
///
/// Only recognised among the aliases of the LAST stage.
pub const RESOLVED_MARKER: &str = "(Resolved)";

/// Current-status name that makes the resolution date count as stage evidence.
///
/// The resolution date is binned under whichever stage declares this alias.
pub const CLOSED_STATUS: &str = "Closed";

/// Changelog field name of a standard status transition.
pub const STATUS_FIELD: &str = "status";

/// Field-type tag carried by custom fields in the changelog.
pub const CUSTOM_FIELD_TYPE: &str = "custom";

/// Custom fields whose transitions are treated as stage transitions.
///
/// A changelog item only counts when its field name is listed here AND its
/// field type is [`CUSTOM_FIELD_TYPE`].
pub const CUSTOM_STAGE_FIELDS: &[&str] = &["Epic Status"];

/// Separator between the date and time portions of an ISO-8601 timestamp.
pub const DATE_TIME_SEPARATOR: char = 'T';

/// Returns true if `alias` is one of the seeding markers rather than a value
/// that can appear in change history.
#[must_use]
pub fn is_marker(alias: &str) -> bool {
    alias == CREATED_MARKER || alias == RESOLVED_MARKER
}
