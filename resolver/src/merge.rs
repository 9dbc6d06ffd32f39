//! Merge directive path helpers.

use metaed_model::{MergeDirective, Property};

/// Split a dot-separated property path into its segments.
pub fn path_segments(path: &str) -> Vec<&str> {
    path.split('.')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Check if a directive's source path starts at the property declaring it.
///
/// The first segment must be the property's full name, role name included.
pub fn source_path_starts_with_property(directive: &MergeDirective, property: &Property) -> bool {
    directive
        .source_property_path_strings
        .first()
        .is_some_and(|first| *first == property.full_property_name)
}
